pub mod remote_dto;
