pub fn run_migrations(conn: &sqlite::Connection) -> Result<(), sqlite::Error> {
    conn.execute(
        "
        CREATE TABLE IF NOT EXISTS chats (
            chat_id         TEXT PRIMARY KEY,
            title           TEXT NOT NULL,
            chat_type       TEXT NOT NULL CHECK (chat_type IN ('private', 'group', 'supergroup', 'channel')),
            username        TEXT,
            is_verified     INTEGER NOT NULL DEFAULT 0,
            last_message_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS contacts (
            user_id   TEXT PRIMARY KEY,
            position  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS messages (
            chat_id       TEXT NOT NULL,
            message_id    INTEGER NOT NULL,
            timestamp     INTEGER NOT NULL,
            text_plain    TEXT NOT NULL,
            PRIMARY KEY (chat_id, message_id)
        );

        CREATE INDEX IF NOT EXISTS idx_messages_chat_timestamp
            ON messages (chat_id, timestamp DESC);

        CREATE TABLE IF NOT EXISTS recently_found (
            chat_id   TEXT PRIMARY KEY,
            seq       INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sync_state (
            id            INTEGER PRIMARY KEY CHECK (id = 1),
            last_sync_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )
}
