use dotenvy::dotenv;

use inkshelf::logging::init_tracing;
use inkshelf::router::init_router;
use inkshelf::state::init_app_state;
use inkshelf::store::postgres::PgUserStore;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "create-admin" {
        handle_create_admin(args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("🚀 Server running on http://localhost:3000");
    println!("📚 Swagger UI available at http://localhost:3000/swagger-ui");
    axum::serve(listener, app).await.unwrap();
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-admin <full_name> <email> <password>", args[0]);
        std::process::exit(1);
    }

    let full_name = &args[2];
    let email = &args[3];
    let password = &args[4];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let store = PgUserStore::new(pool);

    match inkshelf::cli::create_admin(&store, full_name, email, password).await {
        Ok(admin) => {
            println!("✅ Administrator created");
            println!("   Email: {}", admin.email);
            println!("   Name:  {}", admin.full_name);
        }
        Err(e) => {
            eprintln!("❌ Error creating administrator: {}", e);
            std::process::exit(1);
        }
    }
}
