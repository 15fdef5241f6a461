use interwiki_dispatcher::{Dispatcher, KnownWikis, RuleSet, Title};

fn usage<T>(err: &'static str) -> anyhow::Result<T> {
    let exe = std::env::args().next().unwrap_or_default();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Usage: {exe} [options] <interwiki:title>...\n");
    println!("or, use environment variables:");
    println!("    IWD_RULES");
    println!("    IWD_DBLIST\n");
    println!("Options:");
    println!("    --rules: Rule configuration file (JSON)");
    println!("    --dblist: Known wiki database list (default: none)");
    println!("    --query: Query string to append to every URL (default: none)");
    println!("    --namespace: Namespace text of every title (default: none)\n");
    Err(anyhow::Error::msg(err))
}

fn opt_arg(
    args: &mut pico_args::Arguments,
    name: &'static str,
    key: &str,
) -> anyhow::Result<Option<String>> {
    Ok(args
        .opt_value_from_str::<_, String>(name)?
        .or_else(|| std::env::var(key).ok()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return usage("Help requested");
    }

    let Some(rules_path) = opt_arg(&mut args, "--rules", "IWD_RULES")? else {
        return usage("Missing rules file argument");
    };
    let dblist_path = opt_arg(&mut args, "--dblist", "IWD_DBLIST")?;
    let query = args
        .opt_value_from_str::<_, String>("--query")?
        .unwrap_or_default();
    let namespace = args
        .opt_value_from_str::<_, String>("--namespace")?
        .unwrap_or_default();
    let _ = args.contains("--");

    let mut titles = Vec::new();
    while let Some(title) = args.opt_free_from_str::<String>()? {
        titles.push(title);
    }

    if !args.finish().is_empty() {
        return usage("Unknown extra arguments passed");
    }

    if titles.is_empty() {
        return usage("Missing title argument");
    }

    let dispatcher = Dispatcher::new(RuleSet::from_file(&rules_path)?);
    let known = dblist_path
        .map(KnownWikis::from_dblist_file)
        .transpose()?
        .unwrap_or_default();

    for text in titles {
        let title = Title::new(&text, &namespace);
        let url = dispatcher.resolve(&title, &query, &known);
        println!("{text}\t{}", url.as_deref().unwrap_or("-"));
    }

    Ok(())
}
