use std::path::Path;

pub trait PathExt {
    fn base_name(&self) -> String;
}

impl PathExt for Path {
    fn base_name(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
