use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::kitchen_members;

/// Resolve a user to their membership row in a kitchen. `None` means the
/// user is not a member and must not see the kitchen's data.
pub fn member_id_for(
    conn: &mut PgConnection,
    user_id: Uuid,
    kitchen_id: Uuid,
) -> QueryResult<Option<Uuid>> {
    kitchen_members::table
        .filter(kitchen_members::user_id.eq(user_id))
        .filter(kitchen_members::kitchen_id.eq(kitchen_id))
        .select(kitchen_members::id)
        .first(conn)
        .optional()
}
