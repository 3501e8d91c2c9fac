use std::io::Write;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match retroboy::parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let report = retroboy::run(&config)?;

    if config.trace {
        for entry in &report.trace {
            println!("{entry}");
        }
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&report.output)?;
    stdout.flush()?;

    log::info!(
        "{} steps, {} T-cycles{}",
        report.steps,
        report.cycles,
        if report.finished { ", program finished" } else { "" }
    );
    Ok(())
}
