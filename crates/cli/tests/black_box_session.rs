use teller_accounts::{AccountRegistry, TransactionKind};
use teller_cli::{Session, TellerConfig};
use teller_core::Money;

/// Drive a full session over scripted input, returning the final registry
/// and everything printed.
fn run_session(registry: AccountRegistry, lines: &[&str]) -> (AccountRegistry, String) {
    let mut script = lines.join("\n");
    script.push('\n');

    let mut session = Session::new(registry, script.as_bytes(), Vec::new());
    session.run().expect("session should not fail on scripted input");
    let (registry, output) = session.into_parts();
    (registry, String::from_utf8(output).expect("console output is utf-8"))
}

fn sample_registry() -> AccountRegistry {
    TellerConfig::from_lookup(|_| None)
        .expect("default configuration is valid")
        .build_registry()
}

#[test]
fn deposit_withdraw_transfer_round_trip() {
    let mut registry = AccountRegistry::new();
    registry.create_account("U1", "1188", Money::from_units(1000));
    registry.create_account("U2", "2222", Money::from_units(500));
    let total = registry.total_balance();

    let (registry, output) = run_session(
        registry,
        &[
            "1", "U1", "1188", // log in
            "1",    // empty history
            "3", "500", // deposit
            "2", "2000", // overdraw
            "4", "U2", "300", // transfer
            "1",    // history
            "6", "2",
        ],
    );

    assert!(output.contains("Access Granted!"));
    assert!(output.contains("No transactions available"));
    assert!(output.contains("Deposit successful. New balance: $1500.00"));
    assert!(output.contains("Insufficient balance"));
    assert!(output.contains("Transfer successful. New balance: $1200.00"));
    assert!(output.contains(
        "Transaction History:\nDeposit: $500.00\nWithdraw: $300.00\nTransfer: $300.00"
    ));

    let u1 = registry.lookup("U1").unwrap();
    let u2 = registry.lookup("U2").unwrap();
    assert_eq!(u1.balance(), Money::from_units(1200));
    assert_eq!(u2.balance(), Money::from_units(800));
    assert_eq!(
        u2.transaction_history().summaries(),
        vec![(TransactionKind::Deposit, Money::from_units(300))]
    );
    assert_eq!(registry.total_balance(), total.and_then(|total| total.checked_add(Money::from_units(500))));
}

#[test]
fn seeded_accounts_are_reachable() {
    let (registry, output) = run_session(
        sample_registry(),
        &["1", "atmuser2", "1112", "2", "500", "6", "1", "SHARATH", "wrong", "2"],
    );

    assert!(output.contains("Withdrawal successful. New balance: $0.00"));
    assert!(output.contains("Invalid User ID or PIN. Please try again."));
    assert_eq!(registry.lookup("atmuser2").unwrap().balance(), Money::ZERO);
    assert_eq!(registry.len(), 4);
}

#[test]
fn unknown_user_and_wrong_pin_read_the_same() {
    let (_, wrong_pin) = run_session(sample_registry(), &["1", "SHARATH", "0000", "2"]);
    let (_, unknown) = run_session(sample_registry(), &["1", "ghost", "1188", "2"]);
    assert_eq!(wrong_pin, unknown);
}

#[test]
fn transfer_to_self_leaves_balance_unchanged() {
    let (registry, output) = run_session(
        sample_registry(),
        &["1", "atmuser1", "1111", "4", "atmuser1", "100", "6", "2"],
    );

    assert!(output.contains("Transfer successful. New balance: $1500.00"));
    let account = registry.lookup("atmuser1").unwrap();
    assert_eq!(account.id().as_str(), "atmuser1");
    assert_eq!(
        account.transaction_history().summaries(),
        vec![
            (TransactionKind::Withdraw, Money::from_units(100)),
            (TransactionKind::Deposit, Money::from_units(100)),
            (TransactionKind::Transfer, Money::from_units(100)),
        ]
    );
}

#[test]
fn input_ending_mid_amount_prompt_is_clean() {
    let mut registry = AccountRegistry::new();
    registry.create_account("U1", "1188", Money::from_units(10));

    let mut session = Session::new(registry, "1\nU1\n1188\n3\nabc\n".as_bytes(), Vec::new());
    session.run().unwrap();

    assert_eq!(session.registry().lookup("U1").unwrap().balance(), Money::from_units(10));
}

#[test]
fn deposit_in_exponent_notation() {
    let mut registry = AccountRegistry::new();
    registry.create_account("U1", "1188", Money::ZERO);

    let (registry, output) = run_session(registry, &["1", "U1", "1188", "3", "1e3", "1", "6", "2"]);

    assert!(output.contains("Deposit successful. New balance: $1000.00"));
    assert!(output.contains("Transaction History:\nDeposit: $1000.00"));
    assert_eq!(registry.lookup("U1").unwrap().balance(), Money::from_cents(100_000));
}
