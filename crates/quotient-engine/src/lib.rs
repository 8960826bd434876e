//! # quotient-engine: Use Cases and Ports for Quotient
//!
//! The application layer around [`quotient_core`]: everything that touches
//! the outside world on behalf of the pricing domain.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quotient Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             UI / PDF report rendering (out of scope)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PricingRequest / PricingResponse       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ quotient-engine (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │    dto    │  │  usecase  │  │ repository│  │   error   │   │   │
//! │  │   │ camelCase │  │ calculate │  │ port + in │  │ taxonomy  │   │   │
//! │  │   │ contracts │  │ + listing │  │ memory    │  │           │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    quotient-core (pure)                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`dto`] - camelCase wire contracts consumed by the UI layer
//! - [`usecase`] - pricing and catalog-listing orchestration
//! - [`repository`] - the `ItemRepository` port and in-memory adapter
//! - [`error`] - repository and application error types

pub mod dto;
pub mod error;
pub mod repository;
pub mod usecase;

pub use dto::{CatalogItemDto, ItemPricingDto, PricedItemDto, PricingRequest, PricingResponse};
pub use error::{EngineError, EngineResult, RepositoryError, RepositoryResult};
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use usecase::{CalculatePricingUseCase, GetPricingItemsUseCase};
