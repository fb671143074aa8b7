//! Greeter command-line entry point.
//!
//! A small tool built on the dispatcher and the option binder:
//!
//! ```text
//! flagbind-greet greet --name Ada -n 3 --shout
//! flagbind-greet version
//! ```

use std::time::Duration;

use anyhow::Context as _;
use flagbind_app::{logging, App, AppError, Context, LogLevel};
use flagbind_core::{FieldDescriptor, Options};
use tracing::{debug, info};

const USAGE: &str = "\
usage: flagbind-greet <command> [options]

commands:
  greet      print a greeting
  version    print the program path and version

greet options:
  --name <text>          who to greet (default: world)
  --greeting <text>      greeting word (default: Hello)
  -n, --times <count>    number of greetings (default: 1)
  -s, --shout            print in upper case
  --delay-ms <millis>    pause between greetings (default: 0)
  -l, --log-level <lvl>  debug, normal or quiet (default: normal)";

/// Options of the `greet` command
#[derive(Debug, Default)]
struct GreetOptions {
    name: String,
    greeting: String,
    times: u32,
    shout: bool,
    delay_ms: u64,
    log_level: String,
}

impl Options for GreetOptions {
    fn fields(&mut self) -> Vec<FieldDescriptor<'_>> {
        vec![
            FieldDescriptor::new("name", &mut self.name).annotated("name,default=world"),
            FieldDescriptor::new("greeting", &mut self.greeting).annotated("greeting,default=Hello"),
            FieldDescriptor::new("times", &mut self.times).annotated("times,short=n,default=1"),
            FieldDescriptor::new("shout", &mut self.shout).annotated("shout,short=s"),
            FieldDescriptor::new("delay_ms", &mut self.delay_ms).annotated("delay-ms,default=0"),
            FieldDescriptor::new("log_level", &mut self.log_level)
                .annotated("log-level,short=l,default=normal"),
        ]
    }
}

impl GreetOptions {
    fn message(&self) -> String {
        let message = format!("{}, {}!", self.greeting, self.name);
        if self.shout {
            message.to_uppercase()
        } else {
            message
        }
    }
}

async fn greet(ctx: Context, args: Vec<String>) -> anyhow::Result<()> {
    let mut opts = GreetOptions::default();
    flagbind_core::parse(args.get(1..).unwrap_or(&[]), &mut opts).context("invalid greet options")?;

    let level: LogLevel = opts.log_level.parse()?;
    logging::init(level);
    debug!(?opts, "parsed greet options");

    let message = opts.message();
    for round in 0..opts.times {
        if round > 0 && opts.delay_ms > 0 {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(opts.delay_ms)) => {}
                _ = ctx.cancelled() => return Ok(()),
            }
        }
        println!("{}", message);
    }

    info!(times = opts.times, "greeting finished");
    Ok(())
}

async fn version(ctx: Context, _args: Vec<String>) -> anyhow::Result<()> {
    println!("{} {}", ctx.app_path(), flagbind_core::VERSION);
    Ok(())
}

async fn usage(_ctx: Context, args: Vec<String>) -> anyhow::Result<()> {
    println!("{}", USAGE);
    match args.first() {
        Some(command) if command != "help" && command != "--help" && command != "-h" => {
            anyhow::bail!("unknown command: {}", command)
        }
        _ => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut app = App::new();
    app.add_sub_command("greet", greet);
    app.add_sub_command("version", version);
    app.add_default_handler(usage);
    app.add_shutdown_handler(|outcome| match outcome {
        Err(AppError::Cancelled) => {
            eprintln!("interrupted");
            Ok(())
        }
        other => other,
    });

    app.run().await?;
    Ok(())
}
