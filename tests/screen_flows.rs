//! End-to-end screen flows over the mock adapters.
//!
//! Exercises the public crate surface the way an embedding UI would: wire
//! the screens against the fake repositories, drive intents, and observe
//! snapshots through the watch channels.

use std::sync::Arc;

use caremycar_core::adapters::mock::{
    MockAuthGateway, MockOrderRepository, MockPartRepository, MockVehicleRepository,
};
use caremycar_core::adapters::token::InMemoryTokenStore;
use caremycar_core::application::{CatalogScreen, LoginScreen, VehicleFormScreen};
use caremycar_core::domain::{Part, User, UserRole, VehicleMake, VehicleModel};
use caremycar_core::ports::{OrderRepository, TokenStore, VehicleRepository};

/// Captures the transport/screen `tracing` output under test. `try_init`
/// because the subscriber is global and tests share one process.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

fn user() -> User {
    User {
        id: "u1".to_string(),
        email: "ada@caremycar.app".to_string(),
        name: "Ada".to_string(),
        role: UserRole::User,
    }
}

fn part(id: &str, name: &str, category: &str, quantity: u32) -> Part {
    Part {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} description", name),
        category: category.to_string(),
        price_cents: 2_499,
        quantity,
        image_url: String::new(),
    }
}

fn makes() -> Vec<VehicleMake> {
    vec![
        VehicleMake {
            id: "mk-vw".to_string(),
            name: "Volkswagen".to_string(),
            models: vec![
                VehicleModel {
                    id: "md-golf".to_string(),
                    name: "Golf".to_string(),
                },
                VehicleModel {
                    id: "md-polo".to_string(),
                    name: "Polo".to_string(),
                },
            ],
        },
        VehicleMake {
            id: "mk-re".to_string(),
            name: "Renault".to_string(),
            models: vec![VehicleModel {
                id: "md-clio".to_string(),
                name: "Clio".to_string(),
            }],
        },
    ]
}

#[tokio::test]
async fn login_then_sign_out_round_trip() {
    init_tracing();
    let tokens = Arc::new(InMemoryTokenStore::new());
    let auth = Arc::new(
        MockAuthGateway::new(tokens.clone()).with_account("ada@caremycar.app", "secret", user()),
    );
    let screen = LoginScreen::new(auth);
    let rx = screen.subscribe();

    screen.set_email("ada@caremycar.app");
    screen.set_password("secret");
    screen.submit().await;

    assert!(rx.borrow().is_logged_in);
    assert_eq!(rx.borrow().user.as_ref().map(|u| u.name.as_str()), Some("Ada"));
    assert!(tokens.get().is_some());

    screen.sign_out().await;
    assert!(!rx.borrow().is_logged_in);
    assert!(tokens.get().is_none());
}

#[tokio::test]
async fn failed_login_then_corrected_retry() {
    init_tracing();
    let tokens = Arc::new(InMemoryTokenStore::new());
    let auth = Arc::new(
        MockAuthGateway::new(tokens.clone()).with_account("ada@caremycar.app", "secret", user()),
    );
    let screen = LoginScreen::new(auth);

    screen.set_email("ada@caremycar.app");
    screen.set_password("wrong");
    screen.submit().await;
    assert_eq!(screen.state().error.as_deref(), Some("Invalid credentials"));

    // Typing clears the error; the retry succeeds.
    screen.set_password("secret");
    assert!(screen.state().error.is_none());
    screen.submit().await;
    assert!(screen.state().is_logged_in);
}

#[tokio::test]
async fn browse_filter_and_purchase_flow() {
    init_tracing();
    let parts = Arc::new(MockPartRepository::new().with_parts(vec![
        part("p1", "Oil Filter", "filters", 5),
        part("p2", "Brake Pad", "brakes", 2),
        part("p3", "Cabin Filter", "filters", 0),
    ]));
    let orders = Arc::new(MockOrderRepository::new());
    let screen = CatalogScreen::new(parts, orders.clone());

    screen.load().await;
    assert_eq!(screen.state().visible.len(), 3);

    screen.set_category(Some("filters"));
    screen.set_query("oil");
    let visible = screen.state().visible;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "p1");

    // Over-asking is stopped before the repository sees it.
    screen.select_part("p1");
    screen.purchase(9).await;
    assert_eq!(
        screen.state().error.as_deref(),
        Some("Insufficient stock: only 5 left")
    );
    assert_eq!(orders.create_call_count(), 0);

    screen.purchase(2).await;
    let placed = screen.state().placed_order.unwrap();
    assert_eq!(placed.part_id, "p1");
    assert_eq!(placed.quantity, 2);
    assert_eq!(orders.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn make_model_cascade_guards_the_submission() {
    init_tracing();
    let vehicles = Arc::new(MockVehicleRepository::new().with_makes(makes()));
    let screen = VehicleFormScreen::new(vehicles.clone());

    screen.load_makes().await;
    screen.select_make("mk-vw");
    screen.select_model("md-golf");

    // Switching make drops the now-impossible model selection.
    screen.select_make("mk-re");
    assert!(screen.state().selected_model_id.is_none());

    screen.set_year("2021");
    screen.set_plate("XY-987-ZT");
    screen.set_mileage("12000");
    screen.submit().await;
    assert_eq!(screen.state().error.as_deref(), Some("Select a model"));

    screen.select_model("md-clio");
    screen.submit().await;
    let created = screen.state().created_vehicle.unwrap();
    assert_eq!(created.make, "Renault");
    assert_eq!(created.model, "Clio");
    assert_eq!(vehicles.list().await.unwrap().len(), 1);
}
