/// Position of one field inside a native record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

/// Offset table of a `#[repr(C)]` record, generated by
/// `#[derive(NativeLayout)]`.
pub trait NativeLayout: Sized {
    const NAME: &'static str;
    const FIELDS: &'static [FieldLayout];

    fn field(name: &str) -> Option<FieldLayout> {
        Self::FIELDS.iter().find(|x| x.name == name).copied()
    }

    fn offsets() -> Vec<usize> {
        Self::FIELDS.iter().map(|x| x.offset).collect()
    }

    fn size() -> usize {
        std::mem::size_of::<Self>()
    }
}
