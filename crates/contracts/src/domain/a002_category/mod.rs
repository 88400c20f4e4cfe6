pub mod index;
pub mod placement;

pub use index::{
    categories, label_for, offers_platforms, requires_subcategory, subcategories_of,
    subcategory_label, CategoryDef, SubcategoryDef, CATEGORY_INDEX,
};
pub use placement::Placement;
