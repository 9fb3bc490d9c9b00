//! Check command handler: validate a request without running trials.

use std::io::Write;

use handsim_engine::simulation::Simulator;

use crate::cli::RequestArgs;
use crate::error::CliError;
use crate::formatters::format_condition;
use crate::request::Overrides;
use crate::ui;

pub fn handle_check_command(
    args: &RequestArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (request, cards, _) = super::load_inputs(args, Overrides::default())?;
    let sim = Simulator::new(&request, cards.lookup())?;
    ui::warn_missing_metadata(err, sim.missing_metadata())?;

    let deck = sim.deck();
    writeln!(out, "Request OK")?;
    writeln!(
        out,
        "Deck: {} cards ({} distinct), hand size {}",
        deck.len(),
        deck.distinct().len(),
        request.hand_size
    )?;
    writeln!(
        out,
        "Trials: {}, mode: {}, max copies: {}",
        request.trials,
        if request.exclusive { "exclusive" } else { "inclusive" },
        request.max_copies
    )?;
    writeln!(out, "Targets:")?;
    for (i, target) in request.targets.iter().enumerate() {
        writeln!(out, "  {}", target.label(i))?;
        for condition in &target.conditions {
            writeln!(out, "    {}", format_condition(condition))?;
        }
    }
    Ok(())
}
