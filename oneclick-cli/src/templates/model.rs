//! Model templates

/// Registry name of [`MINIMAL`]
pub const MINIMAL_NAME: &str = "model/minimal";

/// Bare model class written before attributes are known
pub const MINIMAL: &str = r"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;

class {{ entity.class }} extends Model
{
    use HasFactory;
}
";

/// Registry name of [`MEMBERS`]
pub const MEMBERS_NAME: &str = "model/members";

/// Fillable list and belongs-to relations injected into the model class
pub const MEMBERS: &str = r"    protected $fillable = [
{% for name in fillable %}
        '{{ name }}',
{% endfor %}
    ];
{% for relation in relations %}

    public function {{ relation.method }}()
    {
        return $this->belongsTo({{ relation.model }}::class);
    }
{% endfor %}
";
