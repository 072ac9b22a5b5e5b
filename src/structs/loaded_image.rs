use crate::structs::data_uri::DataUri;
use crate::structs::file_info::FileInfo;

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub data_uri: DataUri,
    pub file_info: FileInfo,
}
