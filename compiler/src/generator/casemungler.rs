// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// PascalCase of an XML name: split on every character that cannot
/// be part of an identifier (`_`, `-`, `.`, `:` and the like),
/// capitalise the first letter of each part and join.
#[must_use]
pub fn to_pascal<S>(xml_name: S) -> String
where
    S: AsRef<str>,
{
    xml_name
        .as_ref()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}

#[must_use]
pub fn camel_to_snake<S>(camel_str: S) -> String
where
    S: AsRef<str>,
{
    camel_to_words(camel_str.as_ref())
        .collect::<Vec<String>>()
        .join("_")
        .to_lowercase()
}

/// Name of an enumeration constant. Arbitrary lexical values are
/// reduced to identifier characters; values without any become
/// `EMPTY`, values starting with a digit get a `V_` prefix.
#[must_use]
pub fn to_screaming_snake<S>(value: S) -> String
where
    S: AsRef<str>,
{
    let words = value
        .as_ref()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| camel_to_snake(part).to_uppercase())
        .collect::<Vec<_>>();
    if words.is_empty() {
        return "EMPTY".into();
    }
    let name = words.join("_");
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V_{name}")
    } else {
        name
    }
}

fn camel_to_words(s: &str) -> impl Iterator<Item = String> {
    let chars: Vec<char> = s.chars().collect();

    chars
        .iter()
        .enumerate()
        .fold(vec![vec![]], |mut words: Vec<Vec<char>>, (i, &ch)| {
            let split = i > 0 && ch.is_uppercase() && {
                let prev = chars[i - 1];
                // lower to upper, or the last capital of an acronym
                // followed by a lowercase word of 2+ letters
                prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase()
                        && chars[(i + 1)..]
                            .iter()
                            .take_while(|c| c.is_lowercase())
                            .count()
                            >= 2)
            };
            if split {
                words.push(vec![]);
            }
            if let Some(word) = words.last_mut() {
                word.push(ch);
            }
            words
        })
        .into_iter()
        .map(|w| w.into_iter().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_of_xml_names() {
        assert_eq!(to_pascal("getOrder"), "GetOrder");
        assert_eq!(to_pascal("user_request"), "UserRequest");
        assert_eq!(to_pascal("tns:order-line.item"), "TnsOrderLineItem");
        assert_eq!(to_pascal("NumberToWords"), "NumberToWords");
        assert_eq!(to_pascal("_"), "");
    }

    #[test]
    fn snake_of_pascal() {
        assert_eq!(camel_to_snake("GetWeatherResult"), "get_weather_result");
        assert_eq!(camel_to_snake("CityName"), "city_name");
        assert_eq!(camel_to_snake("ubiNum"), "ubi_num");
        assert_eq!(camel_to_snake(""), "");
        assert_eq!(camel_to_snake("F"), "f");
    }

    #[test]
    fn snake_of_acronyms() {
        assert_eq!(camel_to_snake("SOAPAction"), "soap_action");
        assert_eq!(camel_to_snake("HTTPS"), "https");
        assert_eq!(camel_to_snake("PCIEFunctions"), "pcie_functions");
        assert_eq!(camel_to_snake("Value2Text"), "value2_text");
    }

    #[test]
    fn screaming_enum_constants() {
        assert_eq!(to_screaming_snake("Red"), "RED");
        assert_eq!(to_screaming_snake("darkBlue"), "DARK_BLUE");
        assert_eq!(to_screaming_snake("N/A"), "N_A");
        assert_eq!(to_screaming_snake("1.5"), "V_1_5");
        assert_eq!(to_screaming_snake(""), "EMPTY");
        assert_eq!(to_screaming_snake("+"), "EMPTY");
    }
}
