// handlers/protected/mod.rs - Handlers that require an authenticated caller
//
// Every handler takes `AuthUser` as its first extractor, so a missing or
// invalid token is answered with 401 before the path or body is looked at.
pub mod sparplaene;
