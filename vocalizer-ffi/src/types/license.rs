use crate::enums::ValidationKind;
use crate::util::strings::{wide_to_string, WChar};
use std::ffi::c_long;
use vocalizer_proc_macro::NativeLayout;

#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct LicenseRenewInfo {
    pub expires: i64,
    pub renew: i64,
    pub token: *const WChar,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct LicenseInfo {
    pub user_name: *const WChar,
    pub user_id: *const WChar,
    pub email: *const WChar,
    pub distributor: *const WChar,
    pub number: c_long,
    pub renew_info: *mut LicenseRenewInfo,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union ValidationInfoUnion {
    pub license: LicenseInfo,
    pub demo_expiration: i64,
}

/// Result of `VAUTONVDA_getLicenseInfo`, tagged by `kind`.
#[repr(C)]
#[derive(Clone, Copy, NativeLayout)]
pub struct ValidationInfo {
    pub kind: c_long,
    pub info: ValidationInfoUnion,
}

zeroed_default!(LicenseRenewInfo, LicenseInfo, ValidationInfo);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseDetails {
    pub user_name: Option<String>,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub distributor: Option<String>,
    pub number: i64,
    pub expires: Option<i64>,
    pub renew: Option<i64>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Licensed(LicenseDetails),
    Demo { expires: i64 },
    Invalid,
    Unknown(i64),
}

impl ValidationInfo {
    pub fn kind(&self) -> Option<ValidationKind> {
        ValidationKind::try_from(i64::from(self.kind)).ok()
    }

    /// Reads the union member selected by `kind` into owned values.
    ///
    /// # Safety
    /// For a licensed record every non-null string pointer and `renew_info`
    /// must point to live data written by the platform library.
    pub unsafe fn decode(&self) -> Validation {
        match self.kind() {
            Some(ValidationKind::Licensed) => {
                let license = self.info.license;
                let renew = license.renew_info.as_ref();
                Validation::Licensed(LicenseDetails {
                    user_name: wide_to_string(license.user_name),
                    user_id: wide_to_string(license.user_id),
                    email: wide_to_string(license.email),
                    distributor: wide_to_string(license.distributor),
                    number: i64::from(license.number),
                    expires: renew.map(|x| x.expires),
                    renew: renew.map(|x| x.renew),
                    token: renew.and_then(|x| wide_to_string(x.token)),
                })
            }
            Some(ValidationKind::Demo) => Validation::Demo {
                expires: self.info.demo_expiration,
            },
            Some(ValidationKind::Invalid) => Validation::Invalid,
            None => Validation::Unknown(i64::from(self.kind)),
        }
    }
}
