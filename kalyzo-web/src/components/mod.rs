pub mod cart_counter;
pub mod checkout;
pub mod load_more;
pub mod modal;
pub mod product;
pub mod star_rating;
pub mod toast;

pub use cart_counter::{CartCounter, CartCounterIsland};
pub use checkout::{CheckoutIsland, CheckoutModal};
pub use load_more::{CommentsIsland, LoadMoreButton};
pub use modal::Modal;
pub use product::{ProductIsland, ProductPanel};
pub use star_rating::{StarRatingInput, StarRatingIsland};
pub use toast::{ToastHost, ToastStack};
