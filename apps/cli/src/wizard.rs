//! # Interactive Wizard
//!
//! The terminal walk through the three stages and the product form.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Wizard Loop                                          │
//! │                                                                         │
//! │  Stage 1  choose category ──────┐        b: back (stage 2 only)         │
//! │       ▲                         ▼        r: start over (any stage)      │
//! │       └── b ──── Stage 2  choose sub-category                           │
//! │                                 │        q: quit                        │
//! │                                 ▼                                       │
//! │               Stage 3  choose product                                   │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │               Form: one prompt per field, section by section            │
//! │                 ""      keep the shown value                            │
//! │                 :clear  unset the field                                 │
//! │                 :p      pick another product (values reset)             │
//! │                 :r :q   start over / quit                               │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │               generate() ── missing required ──► form again             │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │               print code and QR, optionally export                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering sits behind the [`Presenter`] trait so the driver can be run
//! against scripted input in tests.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{debug, warn};
use ukp_core::{FieldSpec, FieldValue, Stage};

use crate::commands::export::export_code;
use crate::commands::qr::render_qr_text;
use crate::error::ApiError;
use crate::state::SessionState;

/// Answer to a choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// 0-based index into the offered options.
    Picked(usize),
    Back,
    Restart,
    Quit,
}

/// Answer to a field prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Keep,
    Value(String),
    Clear,
    /// Back to the product list of the current sub-category.
    SwitchProduct,
    Restart,
    Quit,
}

/// How a wizard run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Generated(String),
    Quit,
}

/// Rendering and input collection.
pub trait Presenter {
    /// Offers numbered options.
    fn choose(&mut self, label: &str, options: &[String]) -> io::Result<Choice>;

    /// Prompts for one field, showing its current value.
    fn field(&mut self, spec: &FieldSpec, current: Option<&FieldValue>) -> io::Result<FieldInput>;

    /// Shows the generated long code and its QR symbol.
    fn result(&mut self, code: &str) -> io::Result<()>;

    /// Shows a heading or an error.
    fn notice(&mut self, message: &str) -> io::Result<()>;

    /// Yes/no question. Defaults to no.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

// =============================================================================
// Terminal Presenter
// =============================================================================

/// [`Presenter`] over any line-based reader and writer.
///
/// End of input counts as quit.
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalPresenter { input, output }
    }

    /// The writer, e.g. to inspect a buffer in tests.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl TerminalPresenter<io::StdinLock<'static>, io::Stdout> {
    /// Presenter on the process's stdin and stdout.
    pub fn stdio() -> Self {
        TerminalPresenter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn choose(&mut self, label: &str, options: &[String]) -> io::Result<Choice> {
        writeln!(self.output, "\n{label}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{:>3}. {}", i + 1, option)?;
        }

        loop {
            let Some(answer) = self.prompt("Choice [number, b, r, q]: ")? else {
                return Ok(Choice::Quit);
            };

            match answer.to_lowercase().as_str() {
                "b" => return Ok(Choice::Back),
                "r" => return Ok(Choice::Restart),
                "q" => return Ok(Choice::Quit),
                _ => {}
            }

            let picked = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|i| *i < options.len());
            if let Some(index) = picked {
                return Ok(Choice::Picked(index));
            }

            writeln!(self.output, "Invalid choice '{answer}'")?;
        }
    }

    fn field(&mut self, spec: &FieldSpec, current: Option<&FieldValue>) -> io::Result<FieldInput> {
        writeln!(self.output, "{}", spec.display_label())?;
        for (i, option) in spec.options.iter().enumerate() {
            writeln!(self.output, "{:>5}. {}", i + 1, option.display_label())?;
        }
        if let Some(bounds) = &spec.bounds {
            writeln!(self.output, "     ({} to {}, step {})", bounds.min, bounds.max, bounds.step)?;
        }

        let shown = current.map(|v| v.to_string()).unwrap_or_default();
        let Some(answer) = self.prompt(&format!("  [{shown}] > "))? else {
            return Ok(FieldInput::Quit);
        };

        Ok(match answer.as_str() {
            "" => FieldInput::Keep,
            ":clear" => FieldInput::Clear,
            ":p" => FieldInput::SwitchProduct,
            ":r" => FieldInput::Restart,
            ":q" => FieldInput::Quit,
            _ => FieldInput::Value(answer),
        })
    }

    fn result(&mut self, code: &str) -> io::Result<()> {
        writeln!(self.output, "\nLong code:\n{code}")?;
        match render_qr_text(code) {
            Ok(qr) => writeln!(self.output, "\n{qr}"),
            Err(err) => {
                warn!(error = %err, "QR rendering skipped");
                Ok(())
            }
        }
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{question} [y/N]: "))?;
        Ok(matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y" | "yes" | "e" | "evet")
        ))
    }
}

// =============================================================================
// Driver
// =============================================================================

enum FormFlow {
    Done,
    SwitchProduct,
    Restart,
    Quit,
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Category => "Stage 1/3: category",
        Stage::SubCategory => "Stage 2/3: sub-category",
        Stage::Product => "Stage 3/3: product",
    }
}

/// Runs the wizard until a code is generated or the user quits.
///
/// Rejected choices and values are shown through the presenter and the user is
/// asked again; only I/O failures end the run with an error.
pub fn run_wizard<P: Presenter>(
    session: &mut SessionState,
    presenter: &mut P,
) -> Result<WizardOutcome, ApiError> {
    // Set while the product list is re-offered from the form.
    let mut switching = false;

    loop {
        if session.selection().product().is_some() && !switching {
            match fill_form(session, presenter)? {
                FormFlow::SwitchProduct => {
                    switching = true;
                    continue;
                }
                FormFlow::Restart => {
                    session.start_over();
                    continue;
                }
                FormFlow::Quit => return Ok(WizardOutcome::Quit),
                FormFlow::Done => {}
            }

            match session.generate() {
                Ok(code) => {
                    presenter.result(&code)?;
                    return Ok(WizardOutcome::Generated(code));
                }
                Err(err) => presenter.notice(&err.to_string())?,
            }
            continue;
        }

        let stage = session.stage();
        let (codes, labels) = stage_options(session);

        match presenter.choose(stage_label(stage), &labels)? {
            Choice::Picked(index) => {
                let Some(code) = codes.get(index) else {
                    presenter.notice("Invalid choice")?;
                    continue;
                };
                match session.choose(code) {
                    Ok(()) => switching = false,
                    Err(err) => presenter.notice(&err.to_string())?,
                }
            }
            Choice::Back => {
                if let Err(err) = session.back() {
                    presenter.notice(&err.to_string())?;
                }
            }
            Choice::Restart => {
                switching = false;
                session.start_over();
            }
            Choice::Quit => return Ok(WizardOutcome::Quit),
        }
    }
}

/// Choice values and their display labels for the current stage.
fn stage_options(session: &SessionState) -> (Vec<String>, Vec<String>) {
    if session.stage() == Stage::Product {
        session
            .selection()
            .available_products(session.store())
            .into_iter()
            .map(|p| (p.product_code.clone(), p.display_label()))
            .unzip()
    } else {
        let codes: Vec<String> = session.choices().into_iter().map(str::to_string).collect();
        (codes.clone(), codes)
    }
}

fn fill_form<P: Presenter>(
    session: &mut SessionState,
    presenter: &mut P,
) -> Result<FormFlow, ApiError> {
    let form = session.form()?;
    if let Some(product) = session.selection().product() {
        presenter.notice(&format!("\n{}", product.display_label()))?;
    }

    for section in form.sections() {
        presenter.notice(&format!("\n[{}] {}", section.key, section.label))?;

        for spec in &section.fields {
            loop {
                let current = session.selection().values().get(&spec.key).cloned();
                match presenter.field(spec, current.as_ref())? {
                    FieldInput::Keep => break,
                    FieldInput::Value(raw) => match session.set_input(&spec.key, &raw) {
                        Ok(()) => break,
                        Err(err) => presenter.notice(&err.to_string())?,
                    },
                    FieldInput::Clear => {
                        session.clear(&spec.key)?;
                        break;
                    }
                    FieldInput::SwitchProduct => return Ok(FormFlow::SwitchProduct),
                    FieldInput::Restart => return Ok(FormFlow::Restart),
                    FieldInput::Quit => return Ok(FormFlow::Quit),
                }
            }
        }
    }

    debug!(fields = session.selection().values().len(), "Form completed");
    Ok(FormFlow::Done)
}

/// Exports a generated code: to `out` when given, otherwise to
/// `default_file` if the user agrees.
///
/// Returns the path written, if any.
pub fn offer_export<'a, P: Presenter>(
    presenter: &mut P,
    code: &str,
    out: Option<&'a Path>,
    default_file: &'a Path,
) -> Result<Option<&'a Path>, ApiError> {
    let target = match out {
        Some(path) => path,
        None => {
            let question = format!("Export to {}?", default_file.display());
            if !presenter.confirm(&question)? {
                return Ok(None);
            }
            default_file
        }
    };

    export_code(code, target)?;
    presenter.notice(&format!("Saved to {}", target.display()))?;
    Ok(Some(target))
}
