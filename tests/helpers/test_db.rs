use parley::database::Database;
use uuid::Uuid;

pub async fn setup_test_db() -> Database {
    // File-based SQLite with a unique name per test for parallel execution
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    setup_schema(&db).await;

    db
}

async fn setup_schema(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "CREATE TABLE users (
            id TEXT PRIMARY KEY NOT NULL,
            nickname TEXT NOT NULL,
            avatar_url TEXT,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create users table");

    sqlx::query(
        "CREATE TABLE sessions (
            token TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create sessions table");

    sqlx::query(
        "CREATE TABLE listings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            seller_id TEXT NOT NULL,
            title TEXT NOT NULL,
            thumbnail_url TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (seller_id) REFERENCES users(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create listings table");

    sqlx::query(
        "CREATE TABLE rooms (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            listing_id INTEGER NOT NULL,
            user_id TEXT NOT NULL,
            writer_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (listing_id) REFERENCES listings(id) ON DELETE RESTRICT,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE RESTRICT,
            FOREIGN KEY (writer_id) REFERENCES users(id) ON DELETE RESTRICT,
            UNIQUE(listing_id, user_id, writer_id)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create rooms table");

    sqlx::query("CREATE INDEX idx_rooms_user ON rooms(user_id)")
        .execute(pool)
        .await
        .ok();

    sqlx::query("CREATE INDEX idx_rooms_writer ON rooms(writer_id)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id INTEGER NOT NULL,
            sender_id TEXT NOT NULL,
            body TEXT NOT NULL,
            client_count INTEGER NOT NULL DEFAULT 0,
            is_read INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            FOREIGN KEY (room_id) REFERENCES rooms(id) ON DELETE CASCADE,
            FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE RESTRICT
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create messages table");

    sqlx::query("CREATE INDEX idx_messages_room ON messages(room_id)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE push_tokens (
            user_id TEXT PRIMARY KEY NOT NULL,
            token TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create push_tokens table");
}
