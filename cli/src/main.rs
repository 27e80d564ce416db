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

//! `soapgen` command line tool.

mod call;

use crate::call::CallArgs;
use clap::Parser;
use clap::Subcommand;
use soapgen_compiler::commands::process_command;
use soapgen_compiler::commands::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Compiler CLI.
#[derive(Parser, Debug)]
#[command(name = "soapgen")]
#[command(about = "WSDL to Rust SOAP client generator", long_about = None)]
struct Cli {
    /// Debug logging (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Compiler(Commands),
    /// Perform a single SOAP call.
    Call(CallArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_directive = if cli.verbose {
        "soapgen=debug"
    } else {
        "soapgen=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Compiler(command) => process_command(&command)
            .map(|output| output.into_iter().for_each(|msg| println!("{msg}")))
            .map_err(|e| e.to_string()),
        Command::Call(args) => call::run(&args).map_err(|e| e.to_string()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
