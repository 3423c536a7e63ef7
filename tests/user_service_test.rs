use common::{ investment_payload, payload, setup_test_db, strategy_payload, user_payload };
use investment_api::db::entity::{ Investment, User, Wallet };
use investment_api::db::WalletRepository;
use investment_api::services::{ InvestmentService, StrategyService, UserService };
use investment_api::{ AppError, DeletePolicy };
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ ConnectionTrait, EntityTrait, PaginatorTrait };
use serde_json::json;

mod common;

#[tokio::test]
async fn create_user_provisions_empty_wallet() {
    let db = setup_test_db().await;
    let service = UserService::new(db.clone(), DeletePolicy::Cascade);

    let created = service
        .create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await
        .expect("Failed to create user");

    assert_eq!(created.user.first_name, "Ada");
    assert_eq!(created.user.email, "ada@example.com");
    assert_eq!(created.wallet.user_id, created.user.id);
    assert_eq!(created.wallet.balance, Decimal::ZERO);

    let stored = Wallet::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, created.wallet.id);
}

#[tokio::test]
async fn create_user_without_email_persists_nothing() {
    let db = setup_test_db().await;
    let service = UserService::new(db.clone(), DeletePolicy::Cascade);

    let missing = service
        .create_user(payload(json!({ "first_name": "Ada", "last_name": "Lovelace" }))).await
        .unwrap_err();
    let AppError::Validation(errors) = missing else {
        panic!("expected validation error, got {:?}", missing);
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email"]);

    let empty = service.create_user(user_payload("Ada", "Lovelace", "  ")).await.unwrap_err();
    assert!(matches!(empty, AppError::Validation(ref e) if e.contains("email")));

    assert_eq!(User::find().count(&db).await.unwrap(), 0);
    assert_eq!(Wallet::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn failed_wallet_insert_rolls_back_user() {
    let db = setup_test_db().await;
    let service = UserService::new(db.clone(), DeletePolicy::Cascade);

    // Occupy the wallet slot of the next user id so the wallet insert hits
    // the unique index after the user row is written.
    db.execute_unprepared("PRAGMA foreign_keys = OFF").await.unwrap();
    WalletRepository::create_empty(&db, 1).await.unwrap();
    db.execute_unprepared("PRAGMA foreign_keys = ON").await.unwrap();

    let error = service
        .create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await
        .unwrap_err();
    assert!(matches!(error, AppError::Database(_)), "got {:?}", error);

    assert_eq!(User::find().count(&db).await.unwrap(), 0);
    assert_eq!(Wallet::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn create_user_reports_every_invalid_field() {
    let db = setup_test_db().await;
    let service = UserService::new(db, DeletePolicy::Cascade);

    let error = service
        .create_user(payload(json!({ "first_name": "", "last_name": null, "email": "not-an-email" }))).await
        .unwrap_err();

    let AppError::Validation(errors) = error else {
        panic!("expected validation error, got {:?}", error);
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "first_name", "last_name"]);
    assert_eq!(errors.messages("email"), ["The email must be a valid email address."]);
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_side_effects() {
    let db = setup_test_db().await;
    let service = UserService::new(db.clone(), DeletePolicy::Cascade);

    service.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();
    let error = service
        .create_user(user_payload("Augusta", "King", "ada@example.com")).await
        .unwrap_err();

    assert!(matches!(error, AppError::Validation(ref e) if e.contains("email")));
    assert_eq!(User::find().count(&db).await.unwrap(), 1);
    assert_eq!(Wallet::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn list_users_includes_wallets_in_insertion_order() {
    let db = setup_test_db().await;
    let service = UserService::new(db, DeletePolicy::Cascade);

    let first = service.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();
    let second = service.create_user(user_payload("Alan", "Turing", "alan@example.com")).await.unwrap();

    let users = service.list_users().await.unwrap();

    assert_eq!(users, vec![first, second]);
}

#[tokio::test]
async fn missing_user_is_not_found_everywhere() {
    let db = setup_test_db().await;
    let service = UserService::new(db, DeletePolicy::Cascade);

    assert!(matches!(service.get_user(0).await, Err(AppError::NotFound(_))));
    assert!(
        matches!(
            service.update_user(0, user_payload("Ada", "Lovelace", "ada@example.com")).await,
            Err(AppError::NotFound(_))
        )
    );
    assert!(matches!(service.delete_user(0).await, Err(AppError::NotFound(_))));
    assert!(matches!(service.list_investments(0).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn update_user_changes_only_supplied_fields() {
    let db = setup_test_db().await;
    let service = UserService::new(db, DeletePolicy::Cascade);

    let created = service.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();

    let updated = service
        .update_user(created.user.id, payload(json!({ "last_name": "King" }))).await
        .unwrap();

    assert_eq!(updated.user.first_name, "Ada");
    assert_eq!(updated.user.last_name, "King");
    assert_eq!(updated.user.email, "ada@example.com");
    assert_eq!(updated.user.created_at, created.user.created_at);
    assert_eq!(updated.wallet, created.wallet);

    let fetched = service.get_user(created.user.id).await.unwrap();
    assert_eq!(fetched.user.last_name, "King");
}

#[tokio::test]
async fn update_user_validates_supplied_fields() {
    let db = setup_test_db().await;
    let service = UserService::new(db, DeletePolicy::Cascade);

    let ada = service.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();
    service.create_user(user_payload("Alan", "Turing", "alan@example.com")).await.unwrap();

    let invalid = service
        .update_user(ada.user.id, payload(json!({ "first_name": "", "email": "alan@example.com" }))).await
        .unwrap_err();
    let AppError::Validation(errors) = invalid else {
        panic!("expected validation error, got {:?}", invalid);
    };
    assert_eq!(errors.messages("email"), ["The email has already been taken."]);
    assert!(errors.contains("first_name"));

    // Keeping your own email is not a conflict
    let same = service
        .update_user(ada.user.id, payload(json!({ "email": "ada@example.com" }))).await
        .unwrap();
    assert_eq!(same.user.first_name, "Ada");
}

#[tokio::test]
async fn delete_user_removes_it_from_reads() {
    let db = setup_test_db().await;
    let service = UserService::new(db.clone(), DeletePolicy::Cascade);

    let created = service.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();
    service.delete_user(created.user.id).await.unwrap();

    assert!(matches!(service.get_user(created.user.id).await, Err(AppError::NotFound(_))));
    assert!(service.list_users().await.unwrap().is_empty());
    assert_eq!(Wallet::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn list_investments_is_empty_for_new_user() {
    let db = setup_test_db().await;
    let service = UserService::new(db, DeletePolicy::Cascade);

    let created = service.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();

    assert!(service.list_investments(created.user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_investments_returns_only_the_users_in_order() {
    let db = setup_test_db().await;
    let users = UserService::new(db.clone(), DeletePolicy::Cascade);
    let strategies = StrategyService::new(db.clone(), DeletePolicy::Cascade);
    let investments = InvestmentService::new(db);

    let ada = users.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();
    let alan = users.create_user(user_payload("Alan", "Turing", "alan@example.com")).await.unwrap();
    let strategy = strategies.create_strategy(strategy_payload("steady", 12, 0.05, 0.02)).await.unwrap();
    let strategy_id = strategy.strategy.id;

    let first = investments
        .create_investment(investment_payload(ada.user.id, strategy_id, true, json!(1000))).await
        .unwrap();
    investments
        .create_investment(investment_payload(alan.user.id, strategy_id, true, json!(10))).await
        .unwrap();
    let second = investments
        .create_investment(investment_payload(ada.user.id, strategy_id, false, json!(500))).await
        .unwrap();

    let listed = users.list_investments(ada.user.id).await.unwrap();

    assert_eq!(
        listed.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
    // Decimals come back from SQLite through f64.
    assert_eq!(listed[0].returns.round_dp(6), dec!(50));
    assert_eq!(listed[1].returns.round_dp(6), dec!(10));
}

#[tokio::test]
async fn cascade_policy_removes_wallet_and_investments() {
    let db = setup_test_db().await;
    let users = UserService::new(db.clone(), DeletePolicy::Cascade);
    let strategies = StrategyService::new(db.clone(), DeletePolicy::Cascade);
    let investments = InvestmentService::new(db.clone());

    let ada = users.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();
    let strategy = strategies.create_strategy(strategy_payload("steady", 12, 0.05, 0.02)).await.unwrap();
    investments
        .create_investment(investment_payload(ada.user.id, strategy.strategy.id, true, json!(100))).await
        .unwrap();

    users.delete_user(ada.user.id).await.unwrap();

    assert_eq!(User::find().count(&db).await.unwrap(), 0);
    assert_eq!(Wallet::find().count(&db).await.unwrap(), 0);
    assert_eq!(Investment::find().count(&db).await.unwrap(), 0);
    // The strategy itself is independent of the user
    assert!(strategies.get_strategy(strategy.strategy.id).await.is_ok());
}

#[tokio::test]
async fn restrict_policy_blocks_delete_while_investments_exist() {
    let db = setup_test_db().await;
    let users = UserService::new(db.clone(), DeletePolicy::Restrict);
    let strategies = StrategyService::new(db.clone(), DeletePolicy::Restrict);
    let investments = InvestmentService::new(db.clone());

    let ada = users.create_user(user_payload("Ada", "Lovelace", "ada@example.com")).await.unwrap();
    let strategy = strategies.create_strategy(strategy_payload("steady", 12, 0.05, 0.02)).await.unwrap();
    let investment = investments
        .create_investment(investment_payload(ada.user.id, strategy.strategy.id, true, json!(100))).await
        .unwrap();

    let error = users.delete_user(ada.user.id).await.unwrap_err();
    assert!(matches!(error, AppError::Conflict(_)));
    assert_eq!(User::find().count(&db).await.unwrap(), 1);
    assert_eq!(Wallet::find().count(&db).await.unwrap(), 1);

    // Once the investment is gone the user (and its wallet) can be deleted
    investments.delete_investment(investment.id).await.unwrap();
    users.delete_user(ada.user.id).await.unwrap();

    assert_eq!(User::find().count(&db).await.unwrap(), 0);
    assert_eq!(Wallet::find().count(&db).await.unwrap(), 0);
}
