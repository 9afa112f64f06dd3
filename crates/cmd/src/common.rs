// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Filesystem options from the command-line flags.
pub fn build_options(no_auto_create: bool) -> treefs::Options {
    let options = treefs::Options::default();
    if no_auto_create {
        options.disable_auto_create()
    } else {
        options
    }
}

/// Open the script at `path`, or stdin when no path (or `-`) is given.
pub fn open_script(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open script {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_options() {
        assert!(build_options(false).auto_create);
        assert!(!build_options(true).auto_create);
    }

    #[test]
    fn test_open_missing_script() {
        let err = open_script(Some(Path::new("/nonexistent/script.tfs")))
            .err()
            .unwrap();
        assert!(err.to_string().contains("Failed to open script"));
    }
}
