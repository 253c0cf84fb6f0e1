use tokio::sync::Mutex as AsyncMutex;

/// Process-wide lock for tests that mutate environment variables.
pub static ENV_LOCK: AsyncMutex<()> = AsyncMutex::const_new(());
