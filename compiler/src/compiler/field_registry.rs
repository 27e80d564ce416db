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

use crate::generator::casemungler::camel_to_snake;
use crate::generator::casemungler::to_pascal;
use std::collections::HashSet;
use tracing::debug;

/// Field names of one struct.
///
/// Names are handed out in PascalCase and checked for collisions in
/// their snake_case form, which is what becomes the Rust identifier.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    taken: HashSet<String>,
}

impl FieldRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique PascalCase name for a field with `xml_name`. On
    /// collision the name gets an `Attr` or `Elem` suffix, then the
    /// smallest free number starting from 1.
    pub fn unique_field_name(&mut self, xml_name: &str, is_attribute: bool) -> String {
        let mut base = to_pascal(xml_name);
        if base.is_empty() {
            base = "Field".into();
        }
        let name = if self.is_free(&base) {
            base
        } else {
            let suffixed = format!("{base}{}", if is_attribute { "Attr" } else { "Elem" });
            let name = if self.is_free(&suffixed) {
                suffixed
            } else {
                (1..)
                    .map(|n| format!("{suffixed}{n}"))
                    .find(|name| self.is_free(name))
                    .unwrap_or_default()
            };
            debug!("field name {xml_name} taken, using {name}");
            name
        };
        self.taken.insert(camel_to_snake(&name));
        name
    }

    fn is_free(&self, name: &str) -> bool {
        !self.taken.contains(&camel_to_snake(name))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn element_and_attribute_of_one_name() {
        let mut fields = FieldRegistry::new();
        assert_eq!(fields.unique_field_name("id", false), "Id");
        assert_eq!(fields.unique_field_name("id", true), "IdAttr");
        assert_eq!(fields.unique_field_name("Id", true), "IdAttr1");
        assert_eq!(fields.unique_field_name("ID", false), "IDElem");
    }

    #[test]
    fn collisions_are_found_in_snake_case() {
        let mut fields = FieldRegistry::new();
        assert_eq!(fields.unique_field_name("user_name", false), "UserName");
        assert_eq!(fields.unique_field_name("userName", false), "UserNameElem");
        assert_eq!(fields.unique_field_name("UserName", false), "UserNameElem1");
        assert_eq!(fields.unique_field_name("", false), "Field");
    }
}
