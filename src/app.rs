use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    db::{DbError, OracleSession},
    infra::{config::AppConfig, error::AppError},
    mail::{send_mail, MailTransport, SmtpMailer},
    usecases::{bootstrap, commands, context::AppContext, notify, timing::Stopwatch},
};

/// Bootstrap failures (root guard, config, logging init) happen before any
/// log sink exists. They are not logged or mailed; `main` prints them to
/// stderr and exits 1.
pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(&cli)?;
    let mailer = context.config.email.as_ref().map(SmtpMailer::new);

    run_command(
        &context,
        &cli.command,
        mailer.as_ref().map(|mailer| mailer as &dyn MailTransport),
    )?;
    Ok(())
}

/// Runs `command`. A failure is logged, reported through `notifier` and
/// returned so the process exits non-zero.
fn run_command(
    context: &AppContext,
    command: &Command,
    notifier: Option<&dyn MailTransport>,
) -> Result<(), AppError> {
    if let Err(error) = execute(&context.config, command) {
        tracing::error!(command = command.name(), error = %error, "command failed");

        if let Some(transport) = notifier {
            report_failure(transport, &context.config, &error);
        }

        return Err(error);
    }

    tracing::info!(
        program = %context.config.main.program,
        log = %context.logs.info_file.display(),
        "finished"
    );
    Ok(())
}

fn execute(config: &AppConfig, command: &Command) -> Result<(), AppError> {
    tracing::info!(command = command.name(), ">>>>> begin");

    match command {
        Command::Hello { name } => println!("{}", commands::greeting(name)),
        Command::Timed { arg } => {
            let _watch = Stopwatch::start("timed");
            println!("{}", commands::echo(arg));
        }
        Command::DbCheck => with_session(config, |session| {
            println!("{}", commands::db_check(session)?);
            Ok(false)
        })?,
        Command::Query { sql } => with_session(config, |session| {
            for line in commands::query(session, sql)? {
                println!("{line}");
            }
            Ok(false)
        })?,
        Command::Exec { sql, commit } => with_session(config, |session| {
            println!("{}", commands::execute(session, sql)?);
            Ok(*commit)
        })?,
        Command::Notify {
            to,
            subject,
            body,
            urgent,
        } => {
            let email = require_section(config.email.as_ref(), "email")?;
            let message = notify::outgoing_message(email, to, subject, body, *urgent);
            send_mail(&SmtpMailer::new(email), &message)?;
            println!("Mail sent to {} recipient(s)", message.to.len());
        }
    }

    tracing::info!(command = command.name(), "<<<<< end");
    Ok(())
}

/// Opens a session, runs `work`, then disconnects, committing when `work`
/// returns `true`. On error the session is dropped without commit.
fn with_session<F>(config: &AppConfig, work: F) -> Result<(), AppError>
where
    F: FnOnce(&OracleSession) -> Result<bool, DbError>,
{
    let oracle = require_section(config.oracle.as_ref(), "oracle")?;
    let session = OracleSession::connect(oracle)?;
    let commit = work(&session)?;
    session.disconnect(commit)?;
    Ok(())
}

fn require_section<'a, T>(section: Option<&'a T>, name: &'static str) -> Result<&'a T, AppError> {
    section.ok_or(AppError::ConfigSectionMissing { section: name })
}

fn report_failure(transport: &dyn MailTransport, config: &AppConfig, error: &AppError) {
    let Some(message) = notify::failure_notice(config, error) else {
        return;
    };

    match send_mail(transport, &message) {
        Ok(()) => tracing::info!(to = %message.from, "failure notification sent"),
        Err(mail_error) => {
            tracing::warn!(error = %mail_error, "failure notification was not sent")
        }
    }
}
