// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freqgov::cli::Cli;
use freqgov::governor::runner;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "freqgov=debug"
    } else {
        "freqgov=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Environment errors are fatal: a host without the expected control
    // surfaces cannot be adjusted safely.
    if let Err(e) = runner::run(&cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
