// handlers/mod.rs - Two-tier handler layout
//
// public:    no identity required (/, /etfs, /api/health, /api/auth/*)
// protected: AuthUser extractor required (/api/sparplaene/*)
pub mod protected;
pub mod public;
