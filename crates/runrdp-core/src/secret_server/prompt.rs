use std::io::{BufRead, Write};

use super::traits::OperatorPrompt;
use super::types::OperatorLogin;

/// Zero-based index for a 1-based answer out of `count` options.
pub fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    match answer.trim().parse::<usize>() {
        Ok(number) if (1..=count).contains(&number) => Some(number - 1),
        _ => None,
    }
}

/// Asks on stderr and reads answers from stdin; passwords are read without echo.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl OperatorPrompt for TerminalPrompt {
    fn login(&self, service: &str) -> std::io::Result<OperatorLogin> {
        let mut stderr = std::io::stderr();
        write!(stderr, "Enter {service} Username: ")?;
        stderr.flush()?;

        let mut username = String::new();
        std::io::stdin().lock().read_line(&mut username)?;

        let password = rpassword::prompt_password(format!("Enter {service} Password: "))?;

        Ok(OperatorLogin {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        })
    }

    fn choose(&self, title: &str, options: &[String]) -> std::io::Result<Option<usize>> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{title}:")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(stderr, "{}. {}", index + 1, option)?;
        }
        write!(stderr, "\nEnter number to choose: ")?;
        stderr.flush()?;

        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;

        Ok(parse_choice(&answer, options.len()))
    }
}
