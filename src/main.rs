use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod error;
mod help;
mod services;

use config::Config;
use error::{AutotypeError, Result};
use services::{create_runner, Autotype, Outcome, Provisioner};

#[derive(Parser, Debug)]
#[command(name = "passautotype")]
#[command(about = "Автоввод учётных данных из pass-хранилища в активное окно")]
struct Args {
    /// Запустить автоввод для активного окна
    #[arg(short = 't', long = "type")]
    autotype: bool,

    /// Создать autotype-алиас существующей записи
    #[arg(
        short = 's',
        long = "symlink",
        num_args = 2,
        value_names = ["SOURCE_ENTRY", "WINDOWTITLE[/ACCOUNT]"]
    )]
    symlink: Option<Vec<String>>,

    /// Справка: как добавлять записи в хранилище
    #[arg(long)]
    help_add: bool,

    /// Справка: алиасы существующих записей
    #[arg(long)]
    help_symlink: bool,

    /// Справка: язык sequence-записей
    #[arg(long)]
    help_sequence: bool,

    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "passautotype.toml")]
    config: String,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Ошибка: {}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            let _ = e.print();
            return Ok(0);
        }
        // Нераспознанные аргументы - короткая подсказка и код 0
        Err(_) => {
            print_usage_hint();
            return Ok(0);
        }
    };

    if args.help_add {
        println!("{}", help::HELP_ADD);
        return Ok(0);
    }
    if args.help_symlink {
        println!("{}", help::HELP_SYMLINK);
        return Ok(0);
    }
    if args.help_sequence {
        println!("{}", help::HELP_SEQUENCE);
        return Ok(0);
    }

    init_tracing(&args.log_level)?;

    let config = Arc::new(Config::load(&args.config)?);
    // Дочерние вызовы pass должны видеть тот же корень хранилища
    std::env::set_var("PASSWORD_STORE_DIR", &config.store.root);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    let runner = create_runner(args.dry_run);

    if let Some(symlink_args) = &args.symlink {
        let provisioner = Provisioner::new(config, runner);
        return match provisioner.provision(&symlink_args[0], &symlink_args[1]) {
            Ok(prefix) => {
                println!("Создан алиас: {}", prefix);
                provisioner.offer_extras(&prefix).await?;
                Ok(0)
            }
            // Штатные отказы: сообщаем и выходим с кодом 1
            Err(e @ AutotypeError::SourceEntryMissing(_))
            | Err(e @ AutotypeError::AliasConflict(_)) => {
                eprintln!("{}", e);
                Ok(1)
            }
            Err(e) => Err(e),
        };
    }

    if args.autotype {
        let autotype = Autotype::new(config, runner);
        let outcome = autotype.run().await?;
        match outcome {
            Outcome::Completed => {}
            Outcome::NoMatch => info!("Записей для активного окна не найдено"),
            Outcome::Cancelled => info!("Выбор отменён"),
            Outcome::FocusChanged => info!("Фокус сменился, ввод не выполнялся"),
        }
        // Все исходы автоввода - штатное завершение
        return Ok(0);
    }

    print_usage_hint();
    Ok(0)
}

fn print_usage_hint() {
    println!("Использование: passautotype -t | -s SOURCE_ENTRY 'WINDOWTITLE[/ACCOUNT]'");
    println!("Подробнее: passautotype --help, --help-add, --help-symlink, --help-sequence");
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AutotypeError::Config(e.into()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}
