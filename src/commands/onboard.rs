use clap::Args;
use std::io::{self, BufRead, Write};

use ration_core::onboarding::{Answer, FieldKind, FieldSpec, TOTAL_STEPS};
use ration_core::{OnboardingWizard, StepInput};

use super::{open, App, OutputFormat};
use crate::config::Config;

/// Typed on its own line to return to the previous step.
const BACK: &str = "<";
/// Typed for an optional field to leave it empty.
const NONE: &str = "-";

#[derive(Args)]
pub struct OnboardCommand {}

/// What the user submitted for one step.
#[derive(Debug, PartialEq)]
enum StepAnswer {
    Submit(StepInput),
    Back,
}

impl OnboardCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut app = open(config, OutputFormat::Text);
        if app.state().onboarding_completed() {
            println!("A profile already exists. Finishing will replace it.");
        }

        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut out = io::stdout();
        run_wizard(&mut app, &mut reader, &mut out)
    }
}

fn run_wizard<R: BufRead, W: Write>(
    app: &mut App,
    reader: &mut R,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wizard = OnboardingWizard::new();
    writeln!(out, "Type '{}' to go back, '{}' to leave an optional field empty.", BACK, NONE)?;

    loop {
        writeln!(out)?;
        writeln!(
            out,
            "Step {} of {} ({:.0}%)",
            wizard.step(),
            TOTAL_STEPS,
            wizard.progress()
        )?;

        match prompt_step(reader, out, &wizard)? {
            StepAnswer::Back => {
                if !wizard.can_go_back() {
                    writeln!(out, "Already on the first step.")?;
                }
                wizard.previous();
            }
            StepAnswer::Submit(input) if wizard.is_last_step() => {
                if app.finish_onboarding(&mut wizard, input) {
                    return Ok(());
                }
            }
            StepAnswer::Submit(input) => {
                app.onboarding_next(&mut wizard, input);
            }
        }
    }
}

/// Ask every field of the current step. An empty line keeps the saved answer.
fn prompt_step<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    wizard: &OnboardingWizard,
) -> Result<StepAnswer, Box<dyn std::error::Error>> {
    let mut input = StepInput::new();
    for spec in wizard.fields() {
        write!(out, "{}", prompt_text(spec, wizard.answer(spec.name)))?;
        out.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err("Onboarding cancelled".into());
        }
        let line = line.trim();

        if line == BACK {
            return Ok(StepAnswer::Back);
        }
        if line == NONE {
            continue;
        }
        if line.is_empty() {
            if let Some(saved) = wizard.answer(spec.name) {
                input = with_answer(input, spec.name, saved.clone());
            }
            continue;
        }

        let answer = match spec.kind {
            FieldKind::MultiChoice(_) => Answer::Many(
                line.split(',')
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect(),
            ),
            _ => Answer::One(line.to_string()),
        };
        input = with_answer(input, spec.name, answer);
    }
    Ok(StepAnswer::Submit(input))
}

fn with_answer(input: StepInput, field: &str, answer: Answer) -> StepInput {
    match answer {
        Answer::One(value) => input.one(field, value),
        Answer::Many(values) => input.many(field, values),
    }
}

fn prompt_text(spec: &FieldSpec, saved: Option<&Answer>) -> String {
    let hint = match spec.kind {
        FieldKind::Choice(options) => options.join("/"),
        FieldKind::MultiChoice(options) => format!("comma separated: {}", options.join(", ")),
        FieldKind::Number { min, max } => format!("{}-{}", min, max),
    };
    let optional = if spec.required { "" } else { ", optional" };
    match saved {
        Some(answer) => format!("{} ({}{}) [{}]: ", spec.label, hint, optional, answer),
        None => format!("{} ({}{}): ", spec.label, hint, optional),
    }
}
