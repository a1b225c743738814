//! Client tests against a stubbed remote API

use budgetlens_ynab::{BudgetClient, MonthRef, YnabError};

#[tokio::test]
async fn test_list_budgets() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/budgets")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":{"budgets":[
                {"id":"b-1","name":"Household","last_modified_on":"2024-01-05T10:00:00+00:00"},
                {"id":"b-2","name":"Side project","last_modified_on":null}
            ]}}"#,
        )
        .create_async()
        .await;

    let client = BudgetClient::new(server.url());
    let budgets = client.list_budgets("tok-1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(budgets.len(), 2);
    assert_eq!(budgets[0].id, "b-1");
    assert_eq!(budgets[0].name, "Household");
    assert_eq!(budgets[1].last_modified_on, None);
}

#[tokio::test]
async fn test_list_categories_flattens_groups_in_order() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/budgets/b-1/categories")
        .with_status(200)
        .with_body(
            r#"{"data":{"category_groups":[
                {"id":"g-1","name":"Bills","categories":[
                    {"id":"c-1","name":"Rent","budgeted":1,"activity":2,"balance":3},
                    {"id":"c-2","name":"Power","budgeted":4,"activity":5,"balance":6}
                ]},
                {"id":"g-2","name":"Fun","categories":[
                    {"id":"c-3","name":"Games","budgeted":7,"activity":8,"balance":9}
                ]},
                {"id":"g-3","name":"Empty","categories":[]}
            ]}}"#,
        )
        .create_async()
        .await;

    let client = BudgetClient::new(server.url());
    let categories = client.list_categories("tok-1", "b-1").await.unwrap();

    let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["c-1", "c-2", "c-3"]);
}

#[tokio::test]
async fn test_month_detail_current_literal_hits_current_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/budgets/b-1/months/current")
        .with_status(200)
        .with_body(
            r#"{"data":{"month":{
                "month":"2024-03-01",
                "income":250000,
                "activity":-180000,
                "budgeted":240000,
                "categories":[
                    {"id":"c-1","name":"Rent","budgeted":120000,"activity":-120000,"balance":0}
                ]
            }}}"#,
        )
        .create_async()
        .await;

    let client = BudgetClient::new(server.url());
    let month = client
        .month_detail("tok-1", "b-1", &MonthRef::Current)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(month.income, 250_000);
    assert_eq!(month.categories.len(), 1);
}

#[tokio::test]
async fn test_month_detail_explicit_month_hits_dated_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/budgets/b-1/months/2024-03-01")
        .with_status(200)
        .with_body(
            r#"{"data":{"month":{"month":"2024-03-01","income":0,"activity":0,"budgeted":0,"categories":[]}}}"#,
        )
        .create_async()
        .await;

    let client = BudgetClient::new(server.url());
    let month_ref = MonthRef::parse("2024-03").unwrap();
    client
        .month_detail("tok-1", "b-1", &month_ref)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_maps_to_dedicated_variant() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/budgets")
        .with_status(401)
        .with_body(r#"{"error":{"id":"401","name":"unauthorized","detail":"Unauthorized"}}"#)
        .create_async()
        .await;

    let client = BudgetClient::new(server.url());
    let err = client.list_budgets("bad-token").await.unwrap_err();
    assert!(matches!(err, YnabError::Unauthorized));
}

#[tokio::test]
async fn test_other_failures_carry_remote_detail() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/budgets/b-404/months/current")
        .with_status(404)
        .with_body(r#"{"error":{"id":"404.2","name":"not_found","detail":"Budget not found"}}"#)
        .create_async()
        .await;

    let client = BudgetClient::new(server.url());
    let err = client
        .month_detail("tok-1", "b-404", &MonthRef::Current)
        .await
        .unwrap_err();

    match err {
        YnabError::Api { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Budget not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
