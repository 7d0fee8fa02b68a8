use std::any::type_name;

use crate::descriptor::Descriptor;
use crate::value::Row;

/// A struct whose fields map onto table columns.
///
/// Normally derived with `#[derive(Entity)]`. `descriptor` and `bind` must
/// walk the fields in the same order so names and values line up.
pub trait Entity {
    fn descriptor() -> Descriptor;
    fn bind(&self, row: &mut Row);
}

/// Object-safe view of an [`Entity`] instance.
pub trait Record {
    fn describe(&self) -> Descriptor;
    fn bind_row(&self, row: &mut Row);
}

impl<T: Entity> Record for T {
    fn describe(&self) -> Descriptor {
        <T as Entity>::descriptor()
    }

    fn bind_row(&self, row: &mut Row) {
        <T as Entity>::bind(self, row)
    }
}

/// What an insert argument turned out to be.
pub enum Shape<'a> {
    Record(&'a dyn Record),
    /// `fixed_layout` is set when every element is the same entity type, so
    /// the first element's columns stand for all of them.
    Sequence { items: Vec<&'a dyn Insertable>, fixed_layout: bool },
    Scalar(&'static str),
}

/// Anything that can be handed to an insert call. Whether it is actually
/// insertable is decided by its [`Shape`] at call time.
pub trait Insertable {
    fn shape(&self) -> Shape<'_>;

    /// True when every value of this type has the same column layout.
    /// Derived entities say so; anything that may hide a different type
    /// behind it (boxes, references, hand-written records) does not.
    fn fixed_layout() -> bool where Self: Sized {
        false
    }
}

impl<T: Insertable> Insertable for [T] {
    fn shape(&self) -> Shape<'_> {
        let items = self.iter()
            .map(|item| item as &dyn Insertable)
            .collect();

        Shape::Sequence { items, fixed_layout: T::fixed_layout() }
    }
}

impl<T: Insertable> Insertable for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T: Insertable, const N: usize> Insertable for [T; N] {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T: Insertable + ?Sized> Insertable for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Insertable + ?Sized> Insertable for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Insertable> Insertable for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => inner.shape(),
            None => Shape::Scalar(type_name::<Self>()),
        }
    }

    fn fixed_layout() -> bool {
        T::fixed_layout()
    }
}

macro_rules! impl_scalar_insertable {
    { $( $ty:ty ),* } => {
        $(
            impl Insertable for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(type_name::<$ty>())
                }
            }
        )*
    };
}

impl_scalar_insertable! {
    bool, char,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    str, String, ()
}
