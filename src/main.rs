// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bug_match::store::MemoryStore;
use bug_match::{cli, config, console_format, report, ui};

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Resolve selections before touching the dataset
    let request = match config::build_report_request(&args) {
        Ok(r) => r,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };
    let options = config::build_report_options(&args);

    // Load the dataset
    let store = match config::resolve_data_path(&args).and_then(|path| MemoryStore::load(&path)) {
        Ok(s) => s,
        Err(e) => {
            ui::print_error(&e);
            std::process::exit(1);
        }
    };

    if args.list_values {
        print_domains(&store);
        return;
    }

    let bundle = match report::build_report(&store, &request, &options) {
        Ok(b) => b,
        Err(e) => {
            ui::report_failure("Report", &e);
            std::process::exit(1);
        }
    };

    console_format::print_report(&bundle, &options.render.line_break, args.console_width, !args.no_color);

    // Optional exports
    if let Some(ref path) = args.json {
        ui::export_outcome("JSON", path, report::export_json_report(&bundle, &request, path));
    }

    if let Some(ref path) = args.markdown {
        ui::export_outcome("Markdown", path, report::export_markdown_report(&bundle, &options.render.line_break, path));
    }
}

/// Print every country and device in the dataset
fn print_domains(store: &MemoryStore) {
    match report::fetch_domains(store) {
        Ok(domains) => {
            println!("Countries: {}", domains.country.join(", "));
            println!("Devices:   {}", domains.device.join(", "));
        }
        Err(e) => {
            ui::report_failure("Listing values", &e);
            std::process::exit(1);
        }
    }
}
