// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reads an interval log (a path argument, or stdin) and prints a CLASSIC
//! percentile report for each interval it contains.

use std::io::BufRead;

use rustcommon_histogram::log;
use rustcommon_histogram::percentile_printer::{PercentilePrinter, ReportMode};

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1);
    let mut reader: Box<dyn BufRead> = match path {
        Some(path) => match std::fs::File::open(&path) {
            Ok(file) => Box::new(std::io::BufReader::new(file)),
            Err(error) => {
                eprintln!("failed to open file ({path}): {error}");
                std::process::exit(1);
            }
        },
        None => Box::new(std::io::BufReader::new(std::io::stdin())),
    };

    if let Err(error) = log::read_header(&mut reader) {
        eprintln!("failed to read header: {error}");
        std::process::exit(1);
    }

    let printer = PercentilePrinter::new(ReportMode::Classic);
    let stdout = std::io::stdout();
    loop {
        match log::read_interval(&mut reader) {
            Ok(Some(interval)) => {
                let mut handle = stdout.lock();
                if let Err(error) = printer.print(&mut handle, &interval.histogram) {
                    eprintln!("failed to print histogram: {error}");
                    std::process::exit(1);
                }
            }
            Ok(None) => break,
            Err(error) => {
                eprintln!("failed to read interval: {error}");
                std::process::exit(1);
            }
        }
    }
}
