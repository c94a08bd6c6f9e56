use std::io::{self, Write};

use colored::*;

use crate::pkce::PkcePair;
use crate::shell::{CHALLENGE_LABEL, VERIFIER_LABEL};

/// Print a pair with the same labels the shell uses.
pub fn print_pair<W: Write>(out: &mut W, pair: &PkcePair) -> io::Result<()> {
    writeln!(out, "{}{}", VERIFIER_LABEL.cyan(), pair.verifier)?;
    writeln!(out, "{}{}", CHALLENGE_LABEL.cyan(), pair.challenge)
}

pub fn print_success<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", "✓".green().bold(), msg.green())
}

pub fn print_warning<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", "⚠️ ".yellow().bold(), msg.yellow())
}

pub fn print_error<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", "❌".red().bold(), msg.red())
}
