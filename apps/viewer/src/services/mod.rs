// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules: element document loading, the data store and uploads.

pub mod assets;
pub mod notify;
pub mod store;
pub mod uploader;

pub use assets::HttpAssetSource;
pub use notify::{ConsoleNotifier, Notice, NoticeLog};
pub use store::{SceneStore, Snapshot};
pub use uploader::{
    pick_image, HttpUploadTransport, UploadFile, UploadOutcome, Uploader, FILE_FIELD,
};
