//! Odds command handler: exact hypergeometric probability for one card.

use std::io::Write;

use handsim_engine::odds;

use crate::error::CliError;
use crate::formatters::format_percent;

/// Which count the probability is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    AtLeast(u64),
    Exactly(u64),
}

pub fn handle_odds_command(
    deck_size: u64,
    copies: u64,
    hand_size: u64,
    bound: Bound,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if copies > deck_size {
        return Err(CliError::InvalidInput(format!(
            "copies ({}) exceed deck size ({})",
            copies, deck_size
        )));
    }
    if hand_size > deck_size {
        return Err(CliError::InvalidInput(format!(
            "hand size ({}) exceeds deck size ({})",
            hand_size, deck_size
        )));
    }

    let (label, p) = match bound {
        Bound::AtLeast(k) => (
            format!("at least {}", k),
            odds::at_least(deck_size, copies, hand_size, k),
        ),
        Bound::Exactly(k) => (
            format!("exactly {}", k),
            odds::hypergeometric(deck_size, copies, hand_size, k),
        ),
    };
    writeln!(
        out,
        "P({} of {} copies in {} cards from {}) = {:.6} ({})",
        label,
        copies,
        hand_size,
        deck_size,
        p,
        format_percent(p * 100.0)
    )?;
    Ok(())
}
