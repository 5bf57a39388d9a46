/// Declares a unit struct implementing [`Schema`](crate::schema::Schema).
///
/// The tree name is the struct name, so renaming a table orphans its data.
#[macro_export]
macro_rules! define_table {
    ($(#[$docs:meta])+ ( $table_name:ident ) $key:ty => $value:ty) => {
        $(#[$docs])+
        ///
        #[doc = concat!("Takes [`", stringify!($key), "`] as a key and returns [`", stringify!($value), "`]")]
        #[derive(Clone, Copy, Debug, Default)]
        pub(crate) struct $table_name;

        impl $crate::schema::Schema for $table_name {
            const TREE_NAME: &'static str = ::core::stringify!($table_name);
            type Key = $key;
            type Value = $value;
        }

        impl ::std::fmt::Display for $table_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::core::write!(f, "{}", stringify!($table_name))
            }
        }
    };
}
