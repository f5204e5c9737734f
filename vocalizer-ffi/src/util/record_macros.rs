/// `Default` as the all-zero bit pattern: null pointers, `None` callbacks and
/// empty string fields.
macro_rules! zeroed_default {
    ( $( $name:ident ),+ $(,)? ) => {
        $(
            impl Default for $name {
                fn default() -> Self {
                    unsafe { std::mem::zeroed() }
                }
            }
        )+
    };
}
