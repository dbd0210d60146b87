use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use gubae_models::{
    AdminResponse, CreateGroupDto, CreateMemberDto, CreateServiceDto, CreateStaffDto,
    CreateTeacherDto, ErrorResponse, Group, GroupWithMemberCount, LoginRequest, LoginResponse,
    Member, MemberWithGroup, RegisterRequest, Service, Staff, Teacher,
    TransferMembersDto, TransferMembersResponse, UpdateGroupDto, UpdateMemberDto,
    UpdateServiceDto, UpdateStaffDto, UpdateTeacherDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_admin,
        crate::modules::auth::controller::login_admin,
        crate::modules::members::controller::create_member,
        crate::modules::members::controller::get_members,
        crate::modules::members::controller::get_alumni,
        crate::modules::members::controller::get_member,
        crate::modules::members::controller::update_member,
        crate::modules::members::controller::delete_member,
        crate::modules::members::controller::transfer_to_alumni,
        crate::modules::groups::controller::create_group,
        crate::modules::groups::controller::get_groups,
        crate::modules::groups::controller::get_groups_with_member_count,
        crate::modules::groups::controller::get_group,
        crate::modules::groups::controller::get_group_members,
        crate::modules::groups::controller::update_group,
        crate::modules::groups::controller::delete_group,
        crate::modules::staff::controller::create_staff,
        crate::modules::staff::controller::get_staff,
        crate::modules::staff::controller::get_staff_member,
        crate::modules::staff::controller::update_staff,
        crate::modules::staff::controller::delete_staff,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::services::controller::create_service,
        crate::modules::services::controller::get_services,
        crate::modules::services::controller::get_service,
        crate::modules::services::controller::update_service,
        crate::modules::services::controller::delete_service,
    ),
    components(
        schemas(
            ErrorResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            AdminResponse,
            Member,
            MemberWithGroup,
            CreateMemberDto,
            UpdateMemberDto,
            TransferMembersDto,
            TransferMembersResponse,
            Group,
            GroupWithMemberCount,
            CreateGroupDto,
            UpdateGroupDto,
            Staff,
            CreateStaffDto,
            UpdateStaffDto,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            Service,
            CreateServiceDto,
            UpdateServiceDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Administrator registration and login"),
        (name = "Members", description = "Group members and alumni"),
        (name = "Groups", description = "Study groups"),
        (name = "Staff", description = "Office staff"),
        (name = "Teachers", description = "Teachers"),
        (name = "Services", description = "Service inventory")
    ),
    info(
        title = "Gubae API",
        version = "0.1.0",
        description = "Administration API for a church study community: members, groups, staff, teachers and service inventory.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
