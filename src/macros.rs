/// Implements [`Comp`](crate::comp::Comp) and [`Referrer`](crate::entity::Referrer)
/// for the applied type.
/// This macro does not modify the input other than stripping attributes.
///
/// Fields that hold [`EntityRef`](crate::EntityRef)s should be annotated with `#[entity]`.
///
/// # Options
/// Options are applied behind the attribute name in the form `#[comp(...)]`.
/// Multiple options are separated by commas.
///
/// ## `multi`
/// Stores the kind in a [`storage::Chain`](crate::storage::Chain),
/// allowing multiple records of the kind on the same entity.
///
/// ## `name = "..."`
/// Overrides the [name](crate::comp::Comp::name) used in diagnostics.
///
/// # Example
/// ```
/// use kindec::EntityRef;
///
/// #[kindec::comp(name = "turret")]
/// struct Turret {
///     range:  f32,
///     #[entity]
///     target: Option<EntityRef>,
/// }
///
/// #[kindec::comp(multi)]
/// struct Modifier(f32);
///
/// static_assertions::assert_impl_all!(Turret: kindec::comp::Comp);
/// static_assertions::assert_impl_all!(Modifier: kindec::comp::Comp);
/// assert_eq!(<Turret as kindec::comp::Comp>::name(), "turret");
/// ```
#[doc(inline)]
pub use kindec_codegen::comp;

/// Creates a [`comp::Map`](crate::comp::Map) from a list of components.
///
/// # Example
/// ```
/// #[kindec::comp]
/// struct Position(f32, f32);
/// #[kindec::comp]
/// struct Speed(f32);
///
/// let mut world = kindec::World::new();
/// let entity = world.entity(kindec::comps![Position(1.0, 2.0), Speed(3.0)]);
/// assert!(world.has::<Position>(entity));
/// assert!(world.has::<Speed>(entity));
///
/// let empty = kindec::comps![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! comps {
    ($($comp:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::comp::Map::new();
        $(
            map.insert($comp);
        )*
        map
    }};
}
