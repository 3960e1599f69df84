//! command line + the interactive seed prompt

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::Rng;

use crate::constants::CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(name = "infinite_sweeper", about = "Minesweeper on an endless, seeded board")]
pub struct Cli {
    /// board seed; prompts on stdin when omitted, blank means random
    #[arg(long)]
    pub seed: Option<String>,

    /// config file
    #[arg(long, default_value = CONFIG_PATH)]
    pub config: PathBuf,
}

/// 32 hex digits, same shape as a v4 uuid without dashes
pub fn random_seed() -> String {
    let bits: u128 = rand::thread_rng().gen();
    format!("{bits:032x}")
}

/// blank (after trimming the newline) becomes a random seed
pub fn normalize_seed(input: &str) -> String {
    let seed = input.trim_end_matches(['\r', '\n']);
    if seed.is_empty() {
        random_seed()
    } else {
        seed.to_string()
    }
}

pub fn prompt_seed(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<String> {
    write!(output, "enter game seed (leave blank for random): ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(normalize_seed(&line))
}

impl Cli {
    /// `--seed`, or ask on the terminal
    pub fn resolve_seed(&self) -> io::Result<String> {
        match &self.seed {
            Some(seed) => Ok(normalize_seed(seed)),
            None => prompt_seed(&mut io::stdin().lock(), &mut io::stdout()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_seed_is_random_hex() {
        let a = normalize_seed("\n");
        let b = normalize_seed("");
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn given_seed_is_kept_verbatim() {
        assert_eq!(normalize_seed("abc\n"), "abc");
        assert_eq!(normalize_seed("  spaced  "), "  spaced  ");
    }

    #[test]
    fn prompt_reads_one_line() {
        let mut input = io::Cursor::new("hello\nworld\n");
        let mut output = Vec::new();
        assert_eq!(prompt_seed(&mut input, &mut output).unwrap(), "hello");
        assert!(String::from_utf8(output).unwrap().starts_with("enter game seed"));
    }

    struct BrokenStdin;

    impl io::Read for BrokenStdin {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let mut input = io::BufReader::new(BrokenStdin);
        let err = prompt_seed(&mut input, &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from(["infinite_sweeper", "--seed", "abc", "--config", "x.toml"]);
        assert_eq!(cli.seed.as_deref(), Some("abc"));
        assert_eq!(cli.config, PathBuf::from("x.toml"));

        let cli = Cli::parse_from(["infinite_sweeper"]);
        assert!(cli.seed.is_none());
        assert_eq!(cli.config, PathBuf::from(CONFIG_PATH));
    }
}
