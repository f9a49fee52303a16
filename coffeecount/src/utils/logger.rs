use colored::Colorize;

pub fn log_success(message: String) {
    println!("{}: {}", "Success".bright_green(), message.green());
}

pub fn log_fatal(message: String) {
    eprintln!("{}: {}", "FATAL".bright_red().bold(), message.bright_red().bold());
}
