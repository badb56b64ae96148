// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use super::Presenter;
use crate::{
    error::{Error, Result},
    event::Dismissal,
    toast::Toast,
};

#[derive(Debug, Default)]
pub struct UnsupportedPresenter;

impl Presenter for UnsupportedPresenter {
    fn present(&self, _toast: &Toast) -> Result<Dismissal> {
        Err(Error::Unsupported)
    }
}
