use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

// Printed with their values
const DISPLAY_ENVS: [&str; 18] = [
    "RUST_LOG",
    "STORE_HOST",
    "STORE_PORT",
    "STORE_DATABASE_URL",
    "EPAY_TOKEN_URL",
    "EPAY_PUBLIC_KEY_URL",
    "EPAY_PAYMENT_URL",
    "EPAY_CLIENT_ID",
    "EPAY_TERMINAL_ID",
    "EPAY_SCOPE",
    "EPAY_CURRENCY",
    "EPAY_ACCOUNT_ID",
    "EPAY_DESCRIPTION",
    "EPAY_POST_LINK",
    "EPAY_FAILURE_POST_LINK",
    "EPAY_CARD_SAVE",
    "EPAY_REQUEST_TIMEOUT_SECS",
    "EPAY_SUCCESS_STATUSES",
];

// The OAuth client secret and the sandbox card. Only reported as set or not set.
const SECRET_ENVS: [&str; 5] = [
    "EPAY_CLIENT_SECRET",
    "EPAY_TEST_CARD_PAN",
    "EPAY_TEST_CARD_EXPIRY",
    "EPAY_TEST_CARD_CVC",
    "EPAY_TEST_CARD_HOLDER",
];

fn display_envs() {
    println!("Current environment values:");
    DISPLAY_ENVS.iter().for_each(|&name| println!("  {name:<35} {:<15}", env_value(name)));
    println!("Secrets (values are never printed):");
    SECRET_ENVS.iter().for_each(|&name| println!("  {name:<35} {:<15}", secret_status(name)));
}

fn env_value(name: &str) -> String {
    match env::var(name) {
        Ok(s) => s,
        Err(VarError::NotPresent) => "Not set".into(),
        Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
    }
}

fn secret_status(name: &str) -> &'static str {
    match env::var_os(name) {
        Some(v) if !v.is_empty() => "Set",
        Some(_) => "Empty",
        None => "Not set",
    }
}
