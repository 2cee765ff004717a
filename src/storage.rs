//! Badge storage: a wear-levelled FAT partition on internal flash, exposed
//! through the core `FileSystem` trait via std::fs once mounted.

use std::ffi::CString;
use std::fs;
use std::io::Write;
use std::path::Path;

use esp_idf_svc::sys;
use inkbadge_ui::filesystem::{FileInfo, FileSystem, FileSystemError};

const FLASH_MOUNT_POINT: &str = "/flash";
const FLASH_PARTITION_LABEL: &str = "storage";
const FLASH_MAX_FILES: i32 = 8;

pub struct FlashFs {
    base_path: String,
    unavailable: Option<String>,
}

impl FlashFs {
    /// Mount the `storage` partition with wear levelling. Formats it on
    /// first boot so the badge directory can always be created.
    pub fn mount() -> Result<Self, FileSystemError> {
        let base_path = FLASH_MOUNT_POINT.to_string();
        let c_base = CString::new(base_path.clone())
            .map_err(|_| FileSystemError::IoError("Invalid mount path".into()))?;
        let c_label = CString::new(FLASH_PARTITION_LABEL)
            .map_err(|_| FileSystemError::IoError("Invalid partition label".into()))?;

        let mount_config = sys::esp_vfs_fat_mount_config_t {
            format_if_mount_failed: true,
            max_files: FLASH_MAX_FILES,
            allocation_unit_size: 0,
            disk_status_check_enable: false,
            use_one_fat: false,
        };

        let mut wl_handle: sys::wl_handle_t = sys::WL_INVALID_HANDLE as sys::wl_handle_t;
        let res = unsafe {
            sys::esp_vfs_fat_spiflash_mount_rw_wl(
                c_base.as_ptr(),
                c_label.as_ptr(),
                &mount_config,
                &mut wl_handle,
            )
        };

        if res != sys::ESP_OK {
            return Err(FileSystemError::IoError(format!(
                "flash mount failed: {}",
                res
            )));
        }

        log::info!("badge storage mounted at {}", base_path);

        Ok(Self {
            base_path,
            unavailable: None,
        })
    }

    /// A stand-in used when the mount failed. Boot must stay usable: every
    /// operation reports the original mount error, which sends the catalog
    /// down its empty-listing path.
    pub fn unavailable(reason: String) -> Self {
        Self {
            base_path: FLASH_MOUNT_POINT.to_string(),
            unavailable: Some(reason),
        }
    }

    fn check_available(&self) -> Result<(), FileSystemError> {
        match &self.unavailable {
            Some(reason) => Err(FileSystemError::IoError(reason.clone())),
            None => Ok(()),
        }
    }

    fn host_path(&self, path: &str) -> String {
        if path == "/" {
            self.base_path.clone()
        } else {
            format!("{}/{}", self.base_path, path.trim_start_matches('/'))
        }
    }
}

fn to_fs_error(err: std::io::Error) -> FileSystemError {
    match err.kind() {
        std::io::ErrorKind::NotFound => FileSystemError::NotFound,
        std::io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied,
        _ => FileSystemError::IoError(format!("{:?}", err)),
    }
}

impl FileSystem for FlashFs {
    fn list_files(&mut self, path: &str) -> Result<Vec<FileInfo>, FileSystemError> {
        self.check_available()?;
        let host_path = self.host_path(path);
        let mut entries = Vec::new();

        let read_dir = fs::read_dir(&host_path).map_err(to_fs_error)?;
        for entry in read_dir {
            let entry = entry.map_err(to_fs_error)?;
            let meta = entry.metadata().map_err(to_fs_error)?;
            let name = entry.file_name().to_string_lossy().to_string();
            entries.push(FileInfo {
                name,
                size: if meta.is_file() { meta.len() } else { 0 },
                is_directory: meta.is_dir(),
            });
        }

        Ok(entries)
    }

    fn read_file(&mut self, path: &str) -> Result<String, FileSystemError> {
        self.check_available()?;
        fs::read_to_string(self.host_path(path)).map_err(to_fs_error)
    }

    fn read_bytes(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        self.check_available()?;
        fs::read(self.host_path(path)).map_err(to_fs_error)
    }

    fn write_file(&mut self, path: &str, contents: &str) -> Result<(), FileSystemError> {
        self.check_available()?;
        let mut file = fs::File::create(self.host_path(path)).map_err(to_fs_error)?;
        file.write_all(contents.as_bytes()).map_err(to_fs_error)
    }

    fn create_dir(&mut self, path: &str) -> Result<(), FileSystemError> {
        self.check_available()?;
        match fs::create_dir(self.host_path(path)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
            Err(err) => Err(to_fs_error(err)),
        }
    }

    fn exists(&mut self, path: &str) -> bool {
        self.unavailable.is_none() && Path::new(&self.host_path(path)).exists()
    }
}
