use clap::{CommandFactory, Parser};
use msg2eml::cli::Args;
use msg2eml::domain::converter::Converter;
use msg2eml::domain::eml_file::create_eml::MailBuilderSerializer;
use msg2eml::domain::msg_file::parse_msg::OutlookParser;
use msg2eml::error::{AppError, UsageError};
use msg2eml::workflow;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::Level;

fn main() -> ExitCode {
    // コマンドライン引数を解析します。clap の既定の終了コード(2)ではなく 1 を返す
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS // --help / --version
            };
        }
    };

    init_tracing(args.verbose);

    let request = match args.to_request() {
        Ok(request) => request,
        Err(UsageError::MissingInput) => {
            let _ = Args::command().print_help();
            return ExitCode::from(AppError::from(UsageError::MissingInput).exit_code());
        }
        Err(e) => {
            let err = AppError::from(e);
            eprintln!("エラー: {}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    // Ctrl-C では実行中のファイルを書き終えてから止め、途中までの集計を表示する
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
    }

    let converter = Converter::new(OutlookParser, MailBuilderSerializer);
    match workflow::run(&request, &converter, &interrupted) {
        Ok(summary) => {
            if let Err(e) = summary.report(&mut std::io::stdout()) {
                tracing::warn!(error = %e, "failed to print summary");
            }
            ExitCode::from(summary.exit_code())
        }
        Err(e) => {
            eprintln!("エラー: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
