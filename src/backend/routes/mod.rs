//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint handlers
//! ```
//!
//! # Route Organization
//!
//! 1. **API Routes** - Everything under `/api`, dispatched to handlers
//! 2. **Static Files** - The built client application from `STATIC_DIR`
//! 3. **Fallback** - `index.html`, so client-side routes survive a reload
//!
//! # API Routes
//!
//! - `GET /api/folders` - List folders
//! - `POST /api/folders` - Create a folder
//! - `POST /api/oauth` - Exchange an OAuth code for a session token
//! - `GET /api/config` - Client configuration
//!
//! Unknown `/api` paths answer `404` with a JSON body instead of falling
//! through to `index.html`.

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
