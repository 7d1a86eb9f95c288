//! Client configuration constants.

/// Default API host when nothing is stored (dev server).
pub const DEFAULT_API_HOST: &str = "localhost:4000";

/// Header carrying the static client key sent with every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Static client key identifying this frontend to the API.
pub const CLIENT_API_KEY: &str = "learnhub-web-v1";

/// Storage key for the bearer access token.
pub const TOKEN_STORAGE_KEY: &str = "learnhub_access_token";

/// Storage key for the last-known numeric role id.
pub const ROLE_STORAGE_KEY: &str = "learnhub_role_id";

/// Storage key for the API host override.
pub const HOST_STORAGE_KEY: &str = "learnhub_api_host";

/// WebSocket namespace for chat.
pub const CHAT_NAMESPACE: &str = "/chat";
