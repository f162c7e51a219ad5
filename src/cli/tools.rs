use crate::errors::SentinelError;
use crate::scanner::registered_tools;

pub async fn handle_tools() -> Result<(), SentinelError> {
    for tool in registered_tools() {
        let consent = if tool.requires_consent { " (consent required)" } else { "" };
        println!("{:16} {:20} {}{}", tool.name, tool.category, tool.description, consent);
    }
    Ok(())
}
