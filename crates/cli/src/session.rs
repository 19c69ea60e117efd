//! Interactive console session.
//!
//! The session owns the registry and drives it from line-oriented input.
//! It is generic over its reader/writer so tests can script a whole visit.
//!
//! End of input at any prompt ends the session cleanly.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use teller_accounts::AccountRegistry;
use teller_core::{AccountId, AmountError, PositiveAmount, TellerError};

use crate::menu::{ACCOUNT_MENU, AccountCommand, MAIN_MENU, MainMenuChoice};

/// Whether the caller should keep going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, W> {
    registry: AccountRegistry,
    input: R,
    output: W,
    menu_pause: Duration,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(registry: AccountRegistry, input: R, output: W) -> Self {
        Self {
            registry,
            input,
            output,
            menu_pause: Duration::ZERO,
        }
    }

    pub fn with_menu_pause(mut self, pause: Duration) -> Self {
        self.menu_pause = pause;
        self
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    pub fn into_parts(self) -> (AccountRegistry, W) {
        (self.registry, self.output)
    }

    /// Run the main menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.say(&format!("\n{}", "=".repeat(30)))?;
            self.say(" Welcome to the ATM Machine ")?;
            self.say(&"=".repeat(30))?;
            self.say(MAIN_MENU)?;

            let Some(choice) = self.ask("Choose an option: ")? else {
                tracing::debug!("input closed at main menu");
                return Ok(());
            };

            match MainMenuChoice::parse(&choice) {
                Some(MainMenuChoice::AccessAccount) => {
                    let flow = match self.access_account()? {
                        Access::Granted(id) => self.account_menu(&id)?,
                        Access::Denied => {
                            self.return_to_main_menu()?;
                            Flow::Continue
                        }
                        Access::InputClosed => Flow::Exit,
                    };
                    if flow == Flow::Exit {
                        return Ok(());
                    }
                }
                Some(MainMenuChoice::Quit) => {
                    self.say("Thank you for using our ATM. Goodbye!")?;
                    return Ok(());
                }
                None => self.say("Invalid choice. Please try again.")?,
            }
        }
    }

    fn access_account(&mut self) -> Result<Access> {
        self.say("\n--- Account Access ---")?;
        let Some(id) = self.ask("Enter your User ID: ")? else {
            return Ok(Access::InputClosed);
        };
        let Some(code) = self.ask("Enter your PIN: ")? else {
            return Ok(Access::InputClosed);
        };

        match self.registry.try_authenticate(&id, &code) {
            Ok(account) => {
                let id = account.id().clone();
                tracing::info!(account = %id, "access granted");
                self.say("Access Granted!")?;
                Ok(Access::Granted(id))
            }
            Err(err) => {
                self.say(&describe(&err))?;
                Ok(Access::Denied)
            }
        }
    }

    fn account_menu(&mut self, id: &AccountId) -> Result<Flow> {
        let span = tracing::info_span!("account_session", account = %id);
        let _guard = span.enter();

        loop {
            self.say(&format!("\n{ACCOUNT_MENU}"))?;
            let Some(choice) = self.ask("Choose an operation: ")? else {
                return Ok(Flow::Exit);
            };

            let Some(command) = AccountCommand::parse(&choice) else {
                self.say("Invalid operation. Please choose a valid option.")?;
                continue;
            };

            if command == AccountCommand::ReturnToMainMenu {
                self.return_to_main_menu()?;
                return Ok(Flow::Continue);
            }

            if self.dispatch(id, command)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    /// Run one account-menu command against the authenticated account.
    fn dispatch(&mut self, id: &AccountId, command: AccountCommand) -> Result<Flow> {
        tracing::debug!(?command, "dispatch");
        match command {
            AccountCommand::ViewHistory => {
                let message = match self.registry.lookup(id.as_str()) {
                    Some(account) => account.transaction_history().to_string(),
                    None => describe(&TellerError::AuthenticationFailed),
                };
                self.say(&message)?;
            }
            AccountCommand::Withdraw | AccountCommand::Deposit => {
                let Some(amount) = self.ask_amount(command)? else {
                    return Ok(Flow::Exit);
                };
                let outcome = match self.registry.lookup_mut(id.as_str()) {
                    None => Err(TellerError::AuthenticationFailed),
                    Some(account) if command == AccountCommand::Deposit => account
                        .deposit(amount)
                        .map(|balance| format!("Deposit successful. New balance: {balance}")),
                    Some(account) => account
                        .withdraw(amount)
                        .map(|balance| format!("Withdrawal successful. New balance: {balance}")),
                };
                self.report(outcome)?;
            }
            AccountCommand::Transfer => {
                let Some(target) = self.ask("Enter target User ID: ")? else {
                    return Ok(Flow::Exit);
                };
                if !self.registry.contains(&target) {
                    self.say(&describe(&TellerError::target_not_found(target)))?;
                    return Ok(Flow::Continue);
                }
                let Some(amount) = self.ask_amount(command)? else {
                    return Ok(Flow::Exit);
                };
                let outcome = self
                    .registry
                    .transfer(id.as_str(), &target, amount)
                    .map(|balance| format!("Transfer successful. New balance: {balance}"));
                self.report(outcome)?;
            }
            AccountCommand::ChangeSecret => {
                let Some(old) = self.ask("Enter your current PIN: ")? else {
                    return Ok(Flow::Exit);
                };
                let Some(new) = self.ask("Enter your new PIN: ")? else {
                    return Ok(Flow::Exit);
                };
                let outcome = match self.registry.lookup_mut(id.as_str()) {
                    Some(account) => account
                        .change_secret(&old, new)
                        .map(|()| "PIN changed successfully.".to_string()),
                    None => Err(TellerError::AuthenticationFailed),
                };
                self.report(outcome)?;
            }
            AccountCommand::ReturnToMainMenu => {}
        }
        Ok(Flow::Continue)
    }

    /// Prompt until a positive amount is entered. `None` means input ended.
    fn ask_amount(&mut self, command: AccountCommand) -> Result<Option<PositiveAmount>> {
        let action = command.amount_action().unwrap_or("use");
        let prompt = format!("Enter amount to {action}: ");
        loop {
            let Some(line) = self.ask(&prompt)? else {
                return Ok(None);
            };
            match line.parse::<PositiveAmount>() {
                Ok(amount) => return Ok(Some(amount)),
                Err(AmountError::Zero | AmountError::Negative) => {
                    self.say("Please enter a positive amount.")?
                }
                Err(AmountError::TooPrecise) => {
                    self.say("Please enter an amount with at most two decimal places.")?
                }
                Err(AmountError::TooLarge) => self.say("Amount is too large.")?,
                Err(AmountError::Malformed(_)) => {
                    self.say("Invalid input. Please enter a valid number.")?
                }
            }
        }
    }

    fn return_to_main_menu(&mut self) -> Result<()> {
        self.say("Returning to main menu...")?;
        if !self.menu_pause.is_zero() {
            std::thread::sleep(self.menu_pause);
        }
        Ok(())
    }

    fn report(&mut self, outcome: Result<String, TellerError>) -> Result<()> {
        let message = match outcome {
            Ok(message) => message,
            Err(err) => describe(&err),
        };
        self.say(&message)
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("failed to write to console")
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("failed to write to console")?;
        self.output.flush().context("failed to flush console")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from console")?;
        if read == 0 {
            // Keep the transcript tidy when input ends mid-prompt.
            writeln!(self.output).context("failed to write to console")?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

enum Access {
    Granted(AccountId),
    Denied,
    InputClosed,
}

/// Console wording for a domain error.
pub fn describe(err: &TellerError) -> String {
    match err {
        TellerError::IncorrectCurrentSecret => "Incorrect current PIN.".to_string(),
        TellerError::InsufficientBalance { .. } => "Insufficient balance".to_string(),
        TellerError::AuthenticationFailed => {
            "Invalid User ID or PIN. Please try again.".to_string()
        }
        TellerError::BalanceLimitExceeded { .. } => {
            "Amount exceeds the account's balance limit.".to_string()
        }
        TellerError::TargetNotFound(_) => "Target account not found.".to_string(),
        TellerError::InvalidAmount(reason) => format!("Invalid amount: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teller_core::Money;

    fn registry() -> AccountRegistry {
        let mut registry = AccountRegistry::new();
        registry.create_account("U1", "1188", Money::from_units(1000));
        registry.create_account("U2", "2222", Money::from_units(500));
        registry
    }

    fn run_script(script: &str) -> (AccountRegistry, String) {
        run_script_on(registry(), script)
    }

    fn run_script_on(registry: AccountRegistry, script: &str) -> (AccountRegistry, String) {
        let mut session = Session::new(registry, script.as_bytes(), Vec::new());
        session.run().unwrap();
        let (registry, output) = session.into_parts();
        (registry, String::from_utf8(output).unwrap())
    }

    #[test]
    fn quit_says_goodbye() {
        let (_, output) = run_script("2\n");
        assert!(output.contains("Welcome to the ATM Machine"));
        assert!(output.ends_with("Thank you for using our ATM. Goodbye!\n"));
    }

    #[test]
    fn end_of_input_ends_session() {
        let (_, output) = run_script("");
        assert!(output.contains("Choose an option: "));
        assert!(!output.contains("Goodbye"));
    }

    #[test]
    fn wrong_pin_is_denied() {
        let (_, output) = run_script("1\nU1\n0000\n2\n");
        assert!(output.contains("Invalid User ID or PIN. Please try again."));
        assert!(output.contains("Returning to main menu..."));
        assert!(!output.contains("Access Granted!"));
    }

    #[test]
    fn invalid_choices_are_reported() {
        let (_, output) = run_script("9\n1\nU1\n1188\n0\n6\n2\n");
        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.contains("Invalid operation. Please choose a valid option."));
    }

    #[test]
    fn deposit_reprompts_until_amount_is_valid() {
        let (registry, output) = run_script("1\nU1\n1188\n3\nabc\n-4\n0\n1.234\n500\n6\n2\n");
        assert!(output.contains("Invalid input. Please enter a valid number."));
        assert!(output.contains("Please enter a positive amount."));
        assert!(output.contains("Please enter an amount with at most two decimal places."));
        assert!(output.contains("Deposit successful. New balance: $1500.00"));
        assert_eq!(registry.lookup("U1").unwrap().balance(), Money::from_units(1500));
    }

    #[test]
    fn deposit_accepts_exponent_notation() {
        let mut registry = AccountRegistry::new();
        registry.create_account("U1", "1188", Money::ZERO);

        let (registry, output) = run_script_on(registry, "1\nU1\n1188\n3\n1e3\n6\n2\n");
        assert!(output.contains("Deposit successful. New balance: $1000.00"));
        assert_eq!(registry.lookup("U1").unwrap().balance(), Money::from_units(1000));
        assert_eq!(registry.lookup("U1").unwrap().balance(), Money::from_cents(100_000));
    }

    #[test]
    fn deposit_past_balance_limit_is_reported() {
        let mut registry = AccountRegistry::new();
        registry.create_account("U1", "1188", Money::from_cents(u64::MAX - 10));

        let (registry, output) = run_script_on(registry, "1\nU1\n1188\n3\n1\n6\n2\n");
        assert!(output.contains("Amount exceeds the account's balance limit."));
        assert!(!output.contains("Deposit successful"));
        let account = registry.lookup("U1").unwrap();
        assert_eq!(account.balance(), Money::from_cents(u64::MAX - 10));
        assert_eq!(account.transaction_history().entries().len(), 0);
    }

    #[test]
    fn overdraw_reports_insufficient_balance() {
        let (registry, output) = run_script("1\nU1\n1188\n2\n2000\n6\n2\n");
        assert!(output.contains("Insufficient balance"));
        assert_eq!(registry.lookup("U1").unwrap().balance(), Money::from_units(1000));
    }

    #[test]
    fn unknown_transfer_target_skips_amount_prompt() {
        let (_, output) = run_script("1\nU1\n1188\n4\nghost\n6\n2\n");
        assert!(output.contains("Target account not found."));
        assert!(!output.contains("Enter amount to transfer"));
    }

    #[test]
    fn change_pin_then_login_with_new_pin() {
        let (registry, output) =
            run_script("1\nU1\n1188\n5\nnope\n1\n5\n1188\n4321\n6\n1\nU1\n4321\n6\n2\n");
        assert!(output.contains("Incorrect current PIN."));
        assert!(output.contains("PIN changed successfully."));
        assert_eq!(output.matches("Access Granted!").count(), 2);
        assert!(registry.authenticate("U1", "4321").is_some());
    }

    #[test]
    fn describe_covers_every_error() {
        assert_eq!(
            describe(&TellerError::insufficient(Money::from_units(2), Money::from_units(1))),
            "Insufficient balance"
        );
        assert_eq!(
            describe(&TellerError::balance_limit(Money::from_cents(u64::MAX), Money::from_cents(1))),
            "Amount exceeds the account's balance limit."
        );
        assert_eq!(
            describe(&TellerError::invalid_amount("zero")),
            "Invalid amount: zero"
        );
    }
}
