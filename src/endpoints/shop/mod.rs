//! Shop API endpoints.
//!
//! - [`OrderSearch`]: Paged order search (POST)
//! - [`ProductSearch`]: Paged product search (GET)
//! - [`Orders`]: Orders and order notes
//! - [`Baskets`]: Basket lifecycle
//! - [`Site`]: Site information

mod baskets;
mod order_search;
mod orders;
mod product_search;
mod site;

pub use baskets::Baskets;
pub use order_search::OrderSearch;
pub use orders::Orders;
pub use product_search::{ProductSearch, CLIENT_ID_HEADER};
pub use site::Site;
