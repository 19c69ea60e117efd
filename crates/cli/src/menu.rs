//! Menu choices understood by the console session.
//!
//! Each account-menu entry maps to exactly one core operation; parsing is
//! the only thing this module does.

/// Top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    AccessAccount,
    Quit,
}

impl MainMenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MainMenuChoice::AccessAccount),
            "2" => Some(MainMenuChoice::Quit),
            _ => None,
        }
    }
}

/// Operation requested from the account menu of an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCommand {
    ViewHistory,
    Withdraw,
    Deposit,
    Transfer,
    ChangeSecret,
    ReturnToMainMenu,
}

impl AccountCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(AccountCommand::ViewHistory),
            "2" => Some(AccountCommand::Withdraw),
            "3" => Some(AccountCommand::Deposit),
            "4" => Some(AccountCommand::Transfer),
            "5" => Some(AccountCommand::ChangeSecret),
            "6" => Some(AccountCommand::ReturnToMainMenu),
            _ => None,
        }
    }

    /// Verb used in the amount prompt ("Enter amount to ...").
    pub fn amount_action(self) -> Option<&'static str> {
        match self {
            AccountCommand::Withdraw => Some("withdraw"),
            AccountCommand::Deposit => Some("deposit"),
            AccountCommand::Transfer => Some("transfer"),
            _ => None,
        }
    }
}

pub(crate) const MAIN_MENU: &str = "\
1. Access Account
2. Quit";

pub(crate) const ACCOUNT_MENU: &str = "\
--- Account Menu ---
1. View Transaction History
2. Withdraw Cash
3. Deposit Cash
4. Transfer Funds
5. Change PIN
6. Quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_main_menu() {
        assert_eq!(MainMenuChoice::parse(" 1 "), Some(MainMenuChoice::AccessAccount));
        assert_eq!(MainMenuChoice::parse("2"), Some(MainMenuChoice::Quit));
        assert_eq!(MainMenuChoice::parse("3"), None);
        assert_eq!(MainMenuChoice::parse(""), None);
    }

    #[test]
    fn parses_every_account_command() {
        let expected = [
            AccountCommand::ViewHistory,
            AccountCommand::Withdraw,
            AccountCommand::Deposit,
            AccountCommand::Transfer,
            AccountCommand::ChangeSecret,
            AccountCommand::ReturnToMainMenu,
        ];
        for (i, command) in expected.into_iter().enumerate() {
            assert_eq!(AccountCommand::parse(&(i + 1).to_string()), Some(command));
        }
        assert_eq!(AccountCommand::parse("7"), None);
        assert_eq!(AccountCommand::parse("withdraw"), None);
    }

    #[test]
    fn only_money_commands_prompt_for_amounts() {
        assert_eq!(AccountCommand::Deposit.amount_action(), Some("deposit"));
        assert_eq!(AccountCommand::ChangeSecret.amount_action(), None);
    }
}
