//! Welcome banner and connection indicator.

use console::style;

use anos_core::context::ASSISTANT_NAME;

/// Styled online/offline marker.
pub fn status_label(online: bool) -> String {
    if online {
        format!("{}", style("● online").green())
    } else {
        format!("{}", style("● offline").red())
    }
}

/// Print the welcome banner shown at start and after `/clear`.
pub fn print_welcome_banner(server: &str, session_id: &str, online: bool) {
    println!();
    println!("  {}", style(ASSISTANT_NAME).cyan().bold());
    println!(
        "  {}",
        style("Hello! I'm your AI assistant. How can I help you today?").dim()
    );
    println!();
    println!("  {}   {}", style("Server:").bold(), style(server).dim());
    println!("  {}  {}", style("Session:").bold(), style(session_id).dim());
    println!("  {}   {}", style("Status:").bold(), status_label(online));
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
