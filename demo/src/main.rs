//! Warden permission registry — demo CLI.
//!
//! Scans a directory of TOML object manifests into a permission tree, then
//! answers authorization queries and performs gated invocations against it.
//!
//! Usage:
//!   cargo run -p demo -- build --dir demo/fixtures
//!   cargo run -p demo -- check --dir demo/fixtures --module billing \
//!       --object Invoices --method send --profile finance
//!   cargo run -p demo -- invoke --dir demo/fixtures --module billing \
//!       --object Invoices --method send --profile finance \
//!       --arg '"inv-1"' --arg '"now"' --checked

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use warden_contracts::{
    error::{WardenError, WardenResult},
    profile::Profile,
    route::Route,
};
use warden_core::{Executor, ModuleRegistry};
use warden_discover::{Discoverer, Discovery, ScriptFilter};
use warden_manifest::{ManifestIntrospector, ManifestLoader};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Warden — method-level authorization registry demo.
///
/// Every subcommand first builds the permission tree by scanning the given
/// manifest directory, exactly as a hosting process would at startup.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Warden permission registry demo",
    long_about = "Builds a permission tree from a directory of TOML object manifests,\n\
                  then answers authorization queries or performs gated invocations."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a manifest directory and print the resulting tree.
    Build {
        /// Directory to scan for object manifests.
        #[arg(long)]
        dir: String,
    },
    /// Ask whether a profile may invoke a method.
    Check {
        #[command(flatten)]
        target: Target,
    },
    /// Invoke a method if the profile is allowed to.
    Invoke {
        #[command(flatten)]
        target: Target,
        /// JSON-encoded argument; repeat for multiple arguments.
        #[arg(long = "arg")]
        args: Vec<String>,
        /// Also require the declared argument count.
        #[arg(long)]
        checked: bool,
    },
}

/// Everything needed to address one method in the tree.
#[derive(clap::Args)]
struct Target {
    /// Directory to scan for object manifests.
    #[arg(long)]
    dir: String,
    /// Module names to descend through, outermost first; repeatable.
    #[arg(long = "module")]
    modules: Vec<String>,
    /// Object name within the resolved module.
    #[arg(long)]
    object: String,
    /// Method name on the object.
    #[arg(long)]
    method: String,
    /// Profile asking for access.
    #[arg(long)]
    profile: String,
    /// Manifest file name backing the object; defaults to "<object>.toml".
    #[arg(long)]
    script: Option<String>,
}

impl Target {
    fn route(&self) -> WardenResult<Route> {
        let script = self
            .script
            .clone()
            .unwrap_or_else(|| format!("{}.toml", self.object));
        Route::new(
            self.dir.as_str(),
            script,
            self.object.as_str(),
            self.method.as_str(),
            self.modules.clone(),
        )
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build { dir } => run_build(&dir),
        Command::Check { target } => run_check(&target),
        Command::Invoke { target, args, checked } => run_invoke(&target, &args, checked),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn scan(dir: &str) -> WardenResult<Discovery> {
    Discoverer::new(dir)
        .with_filter(ScriptFilter::Extension("toml".to_string()))
        .run(&ManifestIntrospector::new(), &ManifestIntrospector::new())
}

fn run_build(dir: &str) -> WardenResult<()> {
    let discovery = scan(dir)?;

    println!(
        "build {} completed at {}: {} module(s), {} object(s), {} method(s)",
        discovery.report.build_id,
        discovery.report.built_at,
        discovery.report.modules,
        discovery.report.objects,
        discovery.report.methods,
    );
    println!();
    print_tree(&discovery.root, 0);
    Ok(())
}

fn run_check(target: &Target) -> WardenResult<()> {
    let discovery = scan(&target.dir)?;
    let route = target.route()?;
    let profile = Profile::new(target.profile.as_str());

    let allowed = discovery.root.can_be_executed_by(&route, &profile)?;
    println!(
        "profile '{}' may invoke {}: {}",
        profile.as_str(),
        describe(&route),
        if allowed { "yes" } else { "no" },
    );
    Ok(())
}

fn run_invoke(target: &Target, raw_args: &[String], checked: bool) -> WardenResult<()> {
    let discovery = scan(&target.dir)?;
    let route = target.route()?;
    let profile = Profile::new(target.profile.as_str());

    let args = raw_args
        .iter()
        .map(|raw| {
            serde_json::from_str(raw).map_err(|e| WardenError::Invocation {
                reason: format!("argument '{}' is not valid JSON: {}", raw, e),
            })
        })
        .collect::<WardenResult<Vec<serde_json::Value>>>()?;

    let executor = Executor::new(Box::new(ManifestLoader::new()));
    let result = if checked {
        executor.execute_checked(&discovery.root, &route, &profile, &args)?
    } else {
        executor.execute(&discovery.root, &route, &profile, &args)?
    };

    println!("{}", result);
    Ok(())
}

// ── Tree printing ─────────────────────────────────────────────────────────────

fn print_tree(module: &ModuleRegistry, depth: usize) {
    let indent = "  ".repeat(depth);

    let mut objects: Vec<_> = module.objects().collect();
    objects.sort_by_key(|o| o.name().to_string());
    for object in objects {
        println!("{indent}{}", object.name());
        let mut methods: Vec<_> = object.methods().collect();
        methods.sort_by_key(|m| m.name().to_string());
        for method in methods {
            let mut profiles: Vec<_> =
                method.allowed().iter().map(|p| p.as_str().to_string()).collect();
            profiles.sort();
            println!("{indent}  .{} [{}]", method.name(), profiles.join(", "));
        }
    }

    let mut nested: Vec<_> = module.nested_modules().collect();
    nested.sort_by_key(|m| m.name().to_string());
    for child in nested {
        println!("{indent}{}/", child.name());
        print_tree(child, depth + 1);
    }
}

fn describe(route: &Route) -> String {
    if route.has_nested_modules() {
        format!(
            "{}/{}.{}",
            route.modules().join("/"),
            route.object_name(),
            route.method_name()
        )
    } else {
        format!("{}.{}", route.object_name(), route.method_name())
    }
}
