/// Build an ordered attribute list for `build`/`create`/`update`.
///
/// ```ignore
/// let attrs = attributes! { "index" => 25, "name" => "Pikachu" };
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::value::Value)>::new()
    };
    ( $( $column:expr => $value:expr ),+ $(,)? ) => {
        ::std::vec![
            $( (::std::string::String::from($column), $crate::value::Value::from($value)) ),+
        ]
    };
}

/// Build bind values for a WHERE fragment.
///
/// Named binds (`binds![name = "Pikachu"]`) pair with `:name` placeholders;
/// positional binds (`binds!["Pikachu", 25]`) pair with `?` placeholders.
#[macro_export]
macro_rules! binds {
    () => {
        $crate::store::Binds::None
    };
    ( $( $name:ident = $value:expr ),+ $(,)? ) => {
        $crate::store::Binds::Named(::std::vec![
            $( (::std::string::String::from(stringify!($name)), $crate::value::Value::from($value)) ),+
        ])
    };
    ( $( $value:expr ),+ $(,)? ) => {
        $crate::store::Binds::Positional(::std::vec![ $( $crate::value::Value::from($value) ),+ ])
    };
}
