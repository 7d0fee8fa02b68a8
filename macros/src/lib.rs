mod entity;

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;

/// Derives `structinsert::Entity` and `structinsert::Insertable`.
///
/// Fields are mapped with `#[db(column = "name")]`, embedded entities are
/// spliced in with `#[db(flatten)]`, and `#[db(skip)]` or no attribute at
/// all leaves a field out.
#[proc_macro_error]
#[proc_macro_derive(Entity, attributes(db))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::entity_impl(input)
}
