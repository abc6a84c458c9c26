use anyhow::Context;
use clap::Parser;
use listkeeper::utils::{logger, validation::Validate};
use listkeeper::{
    CliConfig, ConfigProvider, ErrorKind, JsonFileStorage, ListStore, Persistence, Reply,
    TomlConfig,
};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting listkeeper CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Some(path) = cli.config.clone() {
        let config = TomlConfig::from_file(&path)
            .with_context(|| format!("Failed to load config file {}", path))?;
        validate_or_exit(&config);
        run(config)
    } else {
        validate_or_exit(&cli);
        run(cli)
    }
}

fn validate_or_exit(config: &impl Validate) {
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run<C: ConfigProvider>(config: C) -> anyhow::Result<()> {
    let storage = JsonFileStorage::new(config.data_file(), config.backup_enabled());
    let mut store = ListStore::new(storage, config);

    display_welcome();

    let stdin = io::stdin();
    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("👋 Goodbye!");
            break;
        }

        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if matches!(command.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("👋 Goodbye!");
            break;
        }

        let mut parts = command.split_whitespace();
        let action = match parts.next() {
            Some(action) => action.to_lowercase(),
            None => continue,
        };
        let args: Vec<&str> = parts.collect();

        handle_command(&mut store, &action, &args);
    }

    Ok(())
}

fn handle_command<P: Persistence, C: ConfigProvider>(
    store: &mut ListStore<P, C>,
    action: &str,
    args: &[&str],
) {
    match action {
        "help" => println!("{}", help_text(store.config())),

        "create" => {
            if args.is_empty() {
                println!("❌ Usage: create <list_name>");
                return;
            }
            print_outcome(store.create_list(&args.join(" ")));
        }

        "lists" => println!("{}", store.show_all_lists()),

        "add" => {
            if args.len() < 2 {
                println!("❌ Usage: add <list_name> <item>");
                return;
            }
            print_outcome(store.add_item(args[0], &args[1..].join(" ")));
        }

        "multi" => {
            if args.len() < 2 {
                println!("❌ Usage: multi <list_name> <item1>, <item2>, <item3>");
                return;
            }
            print_outcome(store.add_items(args[0], &args[1..].join(" ")));
        }

        "remove" => {
            if args.len() < 2 {
                println!("❌ Usage: remove <list_name> <item>");
                return;
            }
            print_outcome(store.remove_item(args[0], &args[1..].join(" ")));
        }

        "show" => {
            if args.is_empty() {
                println!("❌ Usage: show <list_name>");
                return;
            }
            print_outcome(store.show_list(&args.join(" ")));
        }

        "delete" => {
            if args.is_empty() {
                println!("❌ Usage: delete <list_name>");
                return;
            }
            print_outcome(store.delete_list(&args.join(" ")));
        }

        "search" => {
            if args.is_empty() {
                println!("❌ Usage: search <term>");
                return;
            }
            print_outcome(store.search(&args.join(" ")));
        }

        "stats" => println!("{}", store.stats()),

        _ => {
            println!("❌ Unknown command: {}", action);
            println!("Type 'help' for available commands");
        }
    }
}

fn print_outcome(result: listkeeper::Result<Reply>) {
    match result {
        Ok(reply) => println!("{}", reply),
        Err(e) if e.kind() == ErrorKind::Storage => {
            println!("❌ Failed to save your data: {}", e);
        }
        Err(e) => println!("{}", e),
    }
}

fn display_welcome() {
    println!("🤖 listkeeper CLI");
    println!("Type 'help' for commands or 'quit' to exit");
    println!("{}", "-".repeat(40));
    println!("\n💡 Quick start:");
    println!("• create groceries");
    println!("• add groceries milk");
    println!("• multi groceries bread, eggs, butter");
    println!("• show groceries");
    println!("• lists");
}

fn help_text(config: &impl ConfigProvider) -> String {
    format!(
        "🤖 **listkeeper commands:**\n\n\
         **List Management:**\n\
         • `create <list_name>` - Create a new list\n\
         • `lists` - Show all lists\n\
         • `delete <list_name>` - Delete a list\n\n\
         **Item Management:**\n\
         • `add <list_name> <item>` - Add item to list\n\
         • `remove <list_name> <item>` - Remove item from list\n\
         • `show <list_name>` - Show all items in list\n\n\
         **Quick Add:**\n\
         • `multi <list_name> <item1>, <item2>, <item3>` - Add multiple items at once\n\n\
         **Search:**\n\
         • `search <term>` - Search for items across all lists\n\
         • `stats` - Show collection statistics\n\n\
         **Limits:**\n\
         • Max lists: {}\n\
         • Max items per list: {}\n\
         • Max list name length: {}\n\
         • Max item length: {}",
        config.max_lists(),
        config.max_items_per_list(),
        config.max_list_name_length(),
        config.max_item_length()
    )
}
