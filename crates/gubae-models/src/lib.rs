//! # Gubae Models
//!
//! Records stored in the document store and the request/response DTOs that
//! carry them over HTTP. Every DTO validates itself with `validator` and
//! describes itself to the OpenAPI document with `utoipa`.
//!
//! Field names on the wire are camelCase, matching the clients already in use.
//!
//! # Modules
//!
//! - [`auth`]: Administrator credentials, login and registration
//! - [`common`]: Message and error bodies shared by every route
//! - [`groups`]: Study groups
//! - [`members`]: Group members, alumni transfer
//! - [`services`]: Service inventory items
//! - [`staff`]: Office staff
//! - [`teachers`]: Teachers
//! - [`validation`]: Field validators shared across records

pub mod auth;
pub mod common;
pub mod groups;
pub mod members;
pub mod services;
pub mod staff;
pub mod teachers;
pub mod validation;

pub use auth::{AdminResponse, Credential, LoginRequest, LoginResponse, RegisterRequest};
pub use common::ErrorResponse;
pub use groups::{CreateGroupDto, Group, GroupFilterParams, GroupWithMemberCount, UpdateGroupDto};
pub use members::{
    CreateMemberDto, Member, MemberFilterParams, MemberWithGroup, TransferMembersDto,
    TransferMembersResponse, UpdateMemberDto,
};
pub use services::{CreateServiceDto, Service, ServiceFilterParams, UpdateServiceDto};
pub use staff::{CreateStaffDto, Staff, StaffFilterParams, UpdateStaffDto};
pub use teachers::{CreateTeacherDto, Teacher, TeacherFilterParams, UpdateTeacherDto};
