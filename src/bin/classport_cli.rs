//!
//! classport CLI binary
//! --------------------
//! Terminal client for the school portal. Plays the role the browser shell
//! played: restores a persisted session at startup, signs users in and out,
//! walks the guarded route table, and renders the JSON each page would show.

use std::env;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use classport::api::ApiClient;
use classport::cli::{print_page, print_routes, print_session, session_summary};
use classport::config::Config;
use classport::guard::Decision;
use classport::routes::{self, LOGIN_ROUTE, ROOT_ROUTE};
use classport::session::{bootstrap, login, logout, Credentials, SessionMirror, SessionStore};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--connect <url>] [--user <u>] [--password <p>] [--state-dir <path>] [--open <route>]\n\nFlags:\n  --connect <url>          Backend base URL (default: CLASSPORT_API_URL or http://127.0.0.1:8000)\n  --user <u>               Sign in as this user before the prompt starts\n  --password <p>           Password for --user\n  --state-dir <path>       Folder for the persisted session (default: CLASSPORT_STATE_DIR or ~/.classport)\n  --open <route>           Open one route after startup (then the prompt starts)\n  -h, --help               Show this help\n\nInteractive commands:\n  login <user> <password>   sign in; on success navigates to your dashboard\n  logout                    sign out, clear the persisted session and reload\n  whoami                    show the current session\n  status                    one-line session and backend summary\n  routes                    list guarded routes and their endpoints\n  open <route>              navigate to a route (guards decide render vs redirect)\n  help                      show this help\n  quit | exit               leave\n\nExamples:\n  {program} --connect http://127.0.0.1:8000 --user alice --password secret --open /student-dashboard\n  {program} --open /timetable"
    );
}

/// Everything the running client holds. Rebuilt wholesale on logout, the
/// terminal analog of the full page navigation to "/" that guarantees no
/// stale in-memory state survives.
struct AppContext {
    config: Config,
    api: ApiClient,
    store: SessionStore,
    mirror: SessionMirror,
}

impl AppContext {
    fn build(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api_url)
            .with_context(|| format!("while connecting to backend at {}", config.api_url))?;
        let store = SessionStore::new();
        let mirror = SessionMirror::new(&config.state_dir);
        Ok(AppContext { config, api, store, mirror })
    }
}

fn main() -> Result<()> {
    println!(
        r"   ________                                 __
  / ____/ /___ ______________  ____  _____/ /_
 / /   / / __ `/ ___/ ___/ _ \/ __ \/ ___/ __/
/ /___/ / /_/ (__  |__  )  __/ /_/ / /  / /_
\____/_/\__,_/____/____/\___/ .___/_/   \__/
                            /_/   School Portal Terminal"
    );
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut connect_url: Option<String> = None;
    let mut user: Option<String> = None;
    let mut password: Option<String> = None;
    let mut state_dir: Option<String> = None;
    let mut open_route: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--connect" => {
                if i + 1 >= args.len() { eprintln!("--connect requires a URL"); print_usage(&program); std::process::exit(2); }
                connect_url = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--user" => {
                if i + 1 >= args.len() { eprintln!("--user requires a value"); print_usage(&program); std::process::exit(2); }
                user = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--password" => {
                if i + 1 >= args.len() { eprintln!("--password requires a value"); print_usage(&program); std::process::exit(2); }
                password = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--state-dir" => {
                if i + 1 >= args.len() { eprintln!("--state-dir requires a path"); print_usage(&program); std::process::exit(2); }
                state_dir = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--open" => {
                if i + 1 >= args.len() { eprintln!("--open requires a route"); print_usage(&program); std::process::exit(2); }
                open_route = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            unk => {
                eprintln!("Unrecognized argument: {}", unk);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }

    let mut config = Config::from_env();
    if let Some(url) = connect_url { config.api_url = url; }
    if let Some(dir) = state_dir { config.state_dir = dir.into(); }
    config.log_startup();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    let mut ctx = AppContext::build(config)?;

    // Resolve the persisted session before anything can consult a guard.
    rt.block_on(bootstrap(&ctx.store, &ctx.mirror, &ctx.api));
    println!("{}", session_summary(&ctx.store.snapshot()));

    // Optional sign-in from flags, exactly like submitting the login form.
    if let (Some(u), Some(p)) = (user, password) {
        let creds = Credentials { username: u, password: p };
        match rt.block_on(login(&ctx.store, &ctx.mirror, &ctx.api, &creds)) {
            Ok(home) => {
                println!("signed in; opening {}", home);
                navigate(&rt, &ctx, home);
            }
            Err(e) => eprintln!("{}", e.login_form_message()),
        }
    }

    if let Some(route) = open_route {
        navigate(&rt, &ctx, &route);
    }

    // Always enter the prompt after handling any one-shot navigation.
    run_repl(rt, &mut ctx)
}

fn run_repl(rt: tokio::runtime::Runtime, ctx: &mut AppContext) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("classport interpreter. Type 'help' for commands.");
    loop {
        let line = match rl.readline("> ") {
            Ok(l) => l,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => { eprintln!("readline error: {}", e); break; }
        };
        let line = line.trim().to_string();
        if line.is_empty() { continue; }
        let _ = rl.add_history_entry(&line);
        let up = line.to_uppercase();

        if up == "EXIT" || up == "QUIT" { break; }
        if up == "HELP" { print_usage("classport_cli"); continue; }
        if up == "WHOAMI" { print_session(&ctx.store.snapshot()); continue; }
        if up == "ROUTES" { print_routes(); continue; }
        if up == "STATUS" {
            println!("backend: {}", ctx.api.base_url());
            println!("{}", session_summary(&ctx.store.snapshot()));
            continue;
        }
        if up.starts_with("LOGIN ") || up == "LOGIN" {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 3 { eprintln!("usage: login <user> <password>"); continue; }
            let creds = Credentials { username: parts[1].to_string(), password: parts[2].to_string() };
            match rt.block_on(login(&ctx.store, &ctx.mirror, &ctx.api, &creds)) {
                Ok(home) => {
                    println!("signed in; opening {}", home);
                    navigate(&rt, ctx, home);
                }
                Err(e) => eprintln!("{}", e.login_form_message()),
            }
            continue;
        }
        if up == "LOGOUT" {
            logout(&ctx.store, &ctx.mirror);
            // Full reload to "/": rebuild the whole context so nothing
            // stale survives, then resolve the (now empty) session again.
            *ctx = AppContext::build(ctx.config.clone())?;
            rt.block_on(bootstrap(&ctx.store, &ctx.mirror, &ctx.api));
            println!("signed out; back at {}", ROOT_ROUTE);
            continue;
        }
        if up.starts_with("OPEN ") {
            let route = line[5..].trim().to_string();
            navigate(&rt, ctx, &route);
            continue;
        }
        eprintln!("unrecognized command: {} (try 'help')", line);
    }
    Ok(())
}

/// Navigate to a route the way the router would: evaluate the guard, follow
/// redirects (printing each hop), and render the page payload on a grant.
fn navigate(rt: &tokio::runtime::Runtime, ctx: &AppContext, route: &str) {
    let mut current = route.to_string();
    // A grant or an unguarded page ends the walk; redirect chains here are
    // at most two hops (guarded page -> dashboard/login), so four is slack.
    for _hop in 0..4 {
        if current == ROOT_ROUTE {
            println!("[{}] welcome page", ROOT_ROUTE);
            return;
        }
        if current.starts_with(LOGIN_ROUTE) {
            println!("[{}] login form; use: login <user> <password>", current);
            return;
        }
        let Some(spec) = routes::find(&current) else {
            eprintln!("no such route: {}", current);
            return;
        };
        match spec.guard.evaluate(&ctx.store.snapshot(), &current) {
            Decision::Pending => {
                println!("[{}] session still resolving, nothing to show yet", current);
                return;
            }
            Decision::Grant => {
                render_route(rt, ctx, spec);
                return;
            }
            Decision::Redirect(r) => {
                println!("[{}] redirected to {}", current, r.location());
                current = r.to;
            }
        }
    }
    eprintln!("redirect loop while opening {}", route);
}

fn render_route(rt: &tokio::runtime::Runtime, ctx: &AppContext, spec: &routes::RouteSpec) {
    let snapshot = ctx.store.snapshot();
    let Some(token) = snapshot.token() else {
        // Guards keep unauthenticated sessions out; this is belt-and-braces.
        eprintln!("[{}] no session token", spec.path);
        return;
    };
    println!("[{}] {}", spec.path, spec.title);
    match rt.block_on(ctx.api.get_with_auth(token, spec.endpoint)) {
        Ok(val) => {
            if !print_page(&val) {
                let pretty = serde_json::to_string_pretty(&val).unwrap_or_else(|_| val.to_string());
                println!("{}", pretty);
            }
        }
        Err(e) => eprintln!("error: {}", e),
    }
}
