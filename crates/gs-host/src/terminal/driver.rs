use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use gs_app::{StepOutcome, WizardSession, WizardSessionError};
use gs_core::{GuardError, StepId};

use super::{parse_line, Input, Renderer};

/// Runs the read-render loop until `:quit` or end of input.
///
/// Every line is handled to completion before the next one is read, so a
/// simulated request blocks the prompt the way a spinner would.
pub async fn drive<S, R, W>(
    session: &WizardSession<S>,
    renderer: &Renderer,
    input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    S: StepId,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{}", renderer.text("ui.welcome"))?;
    writeln!(output, "{}", renderer.text("ui.help"))?;
    show_step(session, renderer, output).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(error = %err, "unreadable terminal input");
                writeln!(output, "{}", renderer.input_error(&err))?;
                continue;
            }
        };

        match parsed {
            Input::Quit => break,
            Input::Help => writeln!(output, "{}", renderer.text("ui.help"))?,
            Input::Submit(partial) => {
                writeln!(output, "{}", renderer.text("ui.working"))?;
                output.flush()?;
                match session.submit(partial).await {
                    Ok(StepOutcome::Advanced(_)) => show_step(session, renderer, output).await?,
                    Ok(StepOutcome::Completed(completion)) => {
                        info!(session_id = %session.id(), "terminal session completed");
                        writeln!(output, "{}", renderer.completion(&completion))?;
                    }
                    Err(err) => writeln!(output, "{}", renderer.error(&err))?,
                }
            }
            Input::Back => {
                let result = session.previous().await.map(|_| ());
                show_result(session, renderer, output, result).await?;
            }
            Input::GoTo(name) => {
                let result = match S::parse(&name) {
                    Some(target) => session.go_to(target).await.map(|_| ()),
                    None => Err(WizardSessionError::Guard(GuardError::InvalidTarget {
                        target: name,
                    })),
                };
                show_result(session, renderer, output, result).await?;
            }
            Input::Resend => match session.resend().await {
                Ok(()) => writeln!(output, "{}", renderer.text("msg.resent"))?,
                Err(err) => writeln!(output, "{}", renderer.error(&err))?,
            },
            Input::Reset => {
                session.reset().await;
                show_step(session, renderer, output).await?;
            }
        }
        output.flush()?;
    }

    writeln!(output, "{}", renderer.text("msg.bye"))?;
    output.flush()?;
    Ok(())
}

async fn show_step<S: StepId, W: Write>(
    session: &WizardSession<S>,
    renderer: &Renderer,
    output: &mut W,
) -> anyhow::Result<()> {
    let snapshot = session.snapshot().await;
    writeln!(output, "{}", renderer.step(&snapshot))?;
    Ok(())
}

async fn show_result<S: StepId, W: Write>(
    session: &WizardSession<S>,
    renderer: &Renderer,
    output: &mut W,
    result: Result<(), WizardSessionError>,
) -> anyhow::Result<()> {
    match result {
        Ok(()) => show_step(session, renderer, output).await,
        Err(err) => {
            writeln!(output, "{}", renderer.error(&err))?;
            Ok(())
        }
    }
}
