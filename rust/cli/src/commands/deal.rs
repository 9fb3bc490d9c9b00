//! Deal command handler: one hand, checked against every target.

use std::io::Write;

use handsim_engine::simulation::Simulator;

use crate::cli::RequestArgs;
use crate::error::CliError;
use crate::formatters::{format_condition, format_hand, format_mark};
use crate::request::Overrides;
use crate::ui;

/// Draw one hand and print which targets it satisfies.
///
/// Without a seed (flag, request, or config) a random one is drawn and
/// printed so the hand can be reproduced.
pub fn handle_deal_command(
    args: &RequestArgs,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let overrides = Overrides {
        seed,
        ..Overrides::default()
    };
    let (request, cards, _) = super::load_inputs(args, overrides)?;
    let sim = Simulator::new(&request, cards.lookup())?;
    ui::warn_missing_metadata(err, sim.missing_metadata())?;

    let dealt = sim.deal(sim.seed())?;
    writeln!(out, "Seed: {}", sim.seed())?;
    writeln!(out, "Hand: {}", format_hand(&dealt.cards))?;
    for (i, (target, failure)) in request.targets.iter().zip(&dealt.failures).enumerate() {
        match failure {
            None => writeln!(out, "{} {}", format_mark(true), target.label(i))?,
            Some(c) => writeln!(
                out,
                "{} {}  fails {}",
                format_mark(false),
                target.label(i),
                format_condition(&target.conditions[*c])
            )?,
        }
    }
    Ok(())
}
